//! Command-line interface for stellar_leaderboard.

use clap::{Parser, Subcommand};

/// Stellar Leaderboard - ranked, filterable, paginated game leaderboard
#[derive(Parser, Debug)]
#[command(name = "stellar_leaderboard")]
#[command(about = "Query the game leaderboard from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show one page of the leaderboard
    Show {
        /// Game mode filter (empty for all modes)
        #[arg(long, default_value = "")]
        mode: String,

        /// Game region filter (empty for all regions)
        #[arg(long, default_value = "")]
        region: String,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Number of rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u32>,

        /// Path to a TOML config file selecting the backend
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Show one player profile
    Profile {
        /// Profile identifier
        id: String,

        /// Path to a TOML config file selecting the backend
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Ingest fixture JSON documents into a SQLite database
    Load {
        /// Path to the scores JSON document
        #[arg(long, default_value = "data/scores.json")]
        scores: std::path::PathBuf,

        /// Path to the profiles JSON document
        #[arg(long, default_value = "data/profiles.json")]
        profiles: std::path::PathBuf,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long, default_value = "stellar_leaderboard.db")]
        database: String,
    },
}
