//! Stellar Leaderboard - unified CLI
//!
//! Queries the leaderboard through whichever backend is configured and
//! prints the results to the terminal.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use stellar_leaderboard::{
    DieselRepository, FixtureRepository, GAME_MODES, GAME_REGIONS, Leaderboard, LeaderboardConfig,
    Page, ScoreFilter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Show {
            mode,
            region,
            page,
            page_size,
            config,
        } => run_show(mode, region, page, page_size, config).await,
        Command::Profile { id, config } => run_profile(id, config).await,
        Command::Load {
            scores,
            profiles,
            database,
        } => run_load(&scores, &profiles, database).await,
    }
}

/// Loads the config file, or defaults to the fixture backend over the
/// bundled demo data.
fn load_config(config: Option<PathBuf>) -> Result<LeaderboardConfig> {
    Ok(match config {
        Some(path) => LeaderboardConfig::from_file(path)?,
        None => LeaderboardConfig::fixture("data/scores.json", "data/profiles.json"),
    })
}

/// Show one page of the leaderboard.
async fn run_show(
    mode: String,
    region: String,
    page: u32,
    page_size: Option<u32>,
    config: Option<PathBuf>,
) -> Result<()> {
    if !mode.is_empty() && !GAME_MODES.contains(&mode.as_str()) {
        anyhow::bail!(
            "unknown mode '{mode}' (expected one of: {})",
            GAME_MODES.join(", ")
        );
    }
    if !region.is_empty() && !GAME_REGIONS.contains(&region.as_str()) {
        anyhow::bail!(
            "unknown region '{region}' (expected one of: {})",
            GAME_REGIONS.join(", ")
        );
    }

    let config = load_config(config)?;
    let page_size = page_size.unwrap_or_else(|| config.default_page_size());
    let repository = config.build_repository()?;
    let board = Leaderboard::new(repository);

    let filter = ScoreFilter::new(mode, region);
    let page = Page::new(page, page_size);

    // The presentation layer sees one failure signal, whatever went wrong
    // underneath; the taxonomy detail stays in the error chain.
    let result = board
        .query(&filter, &page)
        .await
        .map_err(|e| anyhow::anyhow!("unable to render leaderboard: {e}"))?;

    println!(
        "{:>4}  {:<22} {:<6} {:<12} {:>10}",
        "Rank", "Pilot", "Mode", "Region", "Score"
    );
    for (i, row) in result.rows().iter().enumerate() {
        let rank = page.offset() as usize + i + 1;
        println!(
            "{:>4}  {:<22} {:<6} {:<12} {:>10}",
            rank,
            row.profile().display_name(),
            row.score().game_mode(),
            row.score().game_region(),
            row.score().high_score(),
        );
    }
    println!(
        "\nShowing {} of {} results",
        result.rows().len(),
        result.total_results()
    );

    Ok(())
}

/// Show one player profile.
async fn run_profile(id: String, config: Option<PathBuf>) -> Result<()> {
    let repository = load_config(config)?.build_repository()?;
    let board = Leaderboard::new(repository);

    let profile = board
        .profile_detail(&id)
        .await
        .map_err(|e| anyhow::anyhow!("unable to render profile: {e}"))?;

    println!("{} ({})", profile.display_name(), profile.id());
    println!("Home region: {}", profile.home_region());
    println!("Avatar: {}", profile.avatar_url());
    if profile.achievements().is_empty() {
        println!("No achievements yet");
    } else {
        println!("Achievements:");
        for achievement in profile.achievements() {
            println!("  - {achievement}");
        }
    }

    Ok(())
}

/// Ingest the fixture JSON documents into a SQLite database.
async fn run_load(scores: &Path, profiles: &Path, database: String) -> Result<()> {
    info!(database = %database, "Loading fixture data into SQLite");

    let fixture = FixtureRepository::load(scores, profiles)?;
    let repository = DieselRepository::new(database);
    repository.run_migrations()?;

    for profile in fixture.profiles() {
        repository.insert_profile(profile)?;
    }
    for score in fixture.scores() {
        repository.insert_score(score)?;
    }

    println!(
        "Loaded {} profiles and {} scores",
        fixture.profiles().len(),
        fixture.scores().len()
    );

    Ok(())
}
