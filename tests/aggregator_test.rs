//! Tests for the leaderboard aggregation service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use stellar_leaderboard::{
    FixtureRepository, Leaderboard, LeaderboardError, Page, Profile, Score, ScoreFilter,
};

fn timestamp(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, day)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

fn score(id: &str, profile_id: &str, mode: &str, points: i64, day: u32) -> Score {
    Score::new(
        id.to_string(),
        profile_id.to_string(),
        mode.to_string(),
        "Andromeda".to_string(),
        points,
        timestamp(day),
    )
}

fn profile(id: &str, name: &str) -> Profile {
    Profile::new(
        id.to_string(),
        name.to_string(),
        format!("https://cdn.example.com/avatars/{id}.png"),
        "Andromeda".to_string(),
        vec![],
    )
}

fn board_with(scores: Vec<Score>, profiles: Vec<Profile>) -> Leaderboard {
    let repo = FixtureRepository::from_parts(scores, profiles).expect("Fixture build failed");
    Leaderboard::new(Arc::new(repo))
}

fn sample_board() -> Leaderboard {
    board_with(
        vec![
            score("s1", "p1", "Solo", 9000, 10),
            score("s2", "p2", "Duo", 8000, 11),
            score("s3", "p3", "Solo", 7000, 12),
            score("s4", "p1", "Duo", 6000, 13),
            score("s5", "p2", "Trio", 5000, 14),
        ],
        vec![
            profile("p1", "Nova"),
            profile("p2", "Kael"),
            profile("p3", "Ione"),
        ],
    )
}

#[tokio::test]
async fn test_rows_join_scores_with_matching_profiles() {
    let board = sample_board();
    let page = board
        .query(&ScoreFilter::all(), &Page::new(1, 10))
        .await
        .expect("Query failed");

    assert_eq!(*page.total_results(), 5);
    assert_eq!(page.rows().len(), 5);
    for row in page.rows() {
        assert_eq!(row.profile().id(), row.score().profile_id());
    }
    // Rank order is preserved through the join.
    let ids: Vec<&str> = page.rows().iter().map(|r| r.score().id().as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3", "s4", "s5"]);
}

#[tokio::test]
async fn test_total_results_independent_of_page() {
    let board = sample_board();
    let page = board
        .query(&ScoreFilter::all(), &Page::new(2, 2))
        .await
        .expect("Query failed");

    assert_eq!(*page.total_results(), 5);
    let ids: Vec<&str> = page.rows().iter().map(|r| r.score().id().as_str()).collect();
    assert_eq!(ids, vec!["s3", "s4"]);
}

#[tokio::test]
async fn test_filtered_query_joins_only_matches() {
    let board = sample_board();
    let page = board
        .query(&ScoreFilter::new("Duo", ""), &Page::new(1, 10))
        .await
        .expect("Query failed");

    assert_eq!(*page.total_results(), 2);
    assert!(page.rows().iter().all(|r| r.score().game_mode() == "Duo"));
}

#[tokio::test]
async fn test_page_past_end_is_empty_with_total() {
    let board = sample_board();
    let page = board
        .query(&ScoreFilter::all(), &Page::new(9, 10))
        .await
        .expect("Query failed");

    assert_eq!(*page.total_results(), 5);
    assert!(page.rows().is_empty());
}

#[tokio::test]
async fn test_invalid_page_rejected() {
    let board = sample_board();
    let result = board.query(&ScoreFilter::all(), &Page::new(0, 10)).await;
    assert!(matches!(
        result,
        Err(LeaderboardError::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn test_missing_profile_fails_whole_aggregate() {
    // s2 references a profile that does not exist; the page must fail as a
    // whole rather than returning a partial leaderboard.
    let board = board_with(
        vec![
            score("s1", "p1", "Solo", 9000, 10),
            score("s2", "ghost", "Solo", 8000, 11),
        ],
        vec![profile("p1", "Nova")],
    );

    let result = board.query(&ScoreFilter::all(), &Page::new(1, 10)).await;
    assert!(matches!(result, Err(LeaderboardError::NotFound { .. })));
}

#[tokio::test]
async fn test_profile_detail() {
    let board = sample_board();
    let profile = board.profile_detail("p2").await.expect("Lookup failed");
    assert_eq!(profile.display_name(), "Kael");

    let missing = board.profile_detail("nonexistent-id").await;
    assert!(matches!(missing, Err(LeaderboardError::NotFound { .. })));
}
