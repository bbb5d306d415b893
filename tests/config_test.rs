//! Tests for backend selection via configuration.

use std::io::Write;

use tempfile::NamedTempFile;

use stellar_leaderboard::{LeaderboardConfig, LeaderboardRepository, ScoreFilter};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[tokio::test]
async fn test_fixture_backend_from_toml() {
    let scores = write_temp(
        r#"[{"id": "s1", "profileId": "p1", "gameMode": "Solo", "gameRegion": "Milky Way",
             "highScore": 1200, "submittedAt": "2026-02-10T12:00:00"}]"#,
    );
    let profiles = write_temp(
        r#"[{"id": "p1", "displayName": "Nova", "avatarUrl": "https://cdn.example.com/n.png",
             "homeRegion": "Andromeda", "achievements": []}]"#,
    );

    let config_file = write_temp(&format!(
        "backend = \"fixture\"\nscores_path = \"{}\"\nprofiles_path = \"{}\"\ndefault_page_size = 25\n",
        scores.path().display(),
        profiles.path().display(),
    ));

    let config = LeaderboardConfig::from_file(config_file.path()).expect("Config load failed");
    assert_eq!(config.default_page_size(), 25);

    let repository = config.build_repository().expect("Backend build failed");
    let count = repository
        .count_scores(&ScoreFilter::all())
        .await
        .expect("Count failed");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_sqlite_backend_config() {
    let db_file = NamedTempFile::new().expect("temp file");
    let config = LeaderboardConfig::sqlite(db_file.path().to_str().expect("path"));

    // Builds the repository; the schema has not been migrated, so a query
    // surfaces a backend fault rather than a panic.
    let repository = config.build_repository().expect("Backend build failed");
    let result = repository.count_scores(&ScoreFilter::all()).await;
    assert!(result.is_err());
}

#[test]
fn test_unknown_backend_rejected() {
    let config_file = write_temp("backend = \"cosmic\"\n");
    let config = LeaderboardConfig::from_file(config_file.path()).expect("Config load failed");
    assert!(config.build_repository().is_err());
}

#[test]
fn test_fixture_backend_requires_paths() {
    let config_file = write_temp("backend = \"fixture\"\n");
    let config = LeaderboardConfig::from_file(config_file.path()).expect("Config load failed");
    assert!(config.build_repository().is_err());
}

#[test]
fn test_malformed_config_rejected() {
    let config_file = write_temp("backend = [not toml");
    assert!(LeaderboardConfig::from_file(config_file.path()).is_err());
}
