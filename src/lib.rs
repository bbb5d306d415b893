//! Stellar Leaderboard - ranked, filterable, paginated game leaderboard
//!
//! # Architecture
//!
//! - **Repository contract**: one async read interface every storage
//!   backend implements (profile lookup, paged score fetch, filtered count)
//! - **Fixture backend**: a fixed JSON dataset loaded once and served from
//!   memory, for offline/demo operation
//! - **SQLite backend**: the same contract delegated to a relational store
//!   via diesel, with bound parameters for every caller-supplied value
//! - **Aggregator**: per-request orchestration joining scores with player
//!   profiles, with concurrent count/fetch and fan-out profile lookups
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stellar_leaderboard::{FixtureRepository, Leaderboard, Page, ScoreFilter};
//!
//! # async fn example() -> Result<(), stellar_leaderboard::LeaderboardError> {
//! let repository = FixtureRepository::load("data/scores.json", "data/profiles.json")?;
//! let board = Leaderboard::new(Arc::new(repository));
//!
//! let page = board
//!     .query(&ScoreFilter::new("Duo", "Andromeda"), &Page::new(1, 10))
//!     .await?;
//! println!("{} total results", page.total_results());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod aggregator;
mod config;
mod db;
mod error;
mod fixture;
mod models;
mod repository;

// Crate-level exports - Aggregation service
pub use aggregator::Leaderboard;

// Crate-level exports - Configuration
pub use config::{ConfigError, LeaderboardConfig};

// Crate-level exports - Storage backends
pub use db::DieselRepository;
pub use fixture::FixtureRepository;

// Crate-level exports - Errors
pub use error::LeaderboardError;

// Crate-level exports - Entities
pub use models::{
    GAME_MODES, GAME_REGIONS, LeaderboardPage, Profile, Score, ScoreProfile,
};

// Crate-level exports - Repository contract
pub use repository::{LeaderboardRepository, Page, ScoreFilter};
