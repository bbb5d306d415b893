//! Domain entities for the leaderboard: scores, profiles, and their join.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Game modes known to the presentation layer.
pub const GAME_MODES: [&str; 3] = ["Solo", "Duo", "Trio"];

/// Game regions known to the presentation layer.
pub const GAME_REGIONS: [&str; 5] = [
    "Milky Way",
    "Andromeda",
    "Pinwheel",
    "NGC 1300",
    "Messier 82",
];

/// A single submitted high score. Immutable once stored; created by an
/// ingestion path outside the query service.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    id: String,
    profile_id: String,
    game_mode: String,
    game_region: String,
    high_score: i64,
    submitted_at: NaiveDateTime,
}

/// A player profile. Read-only from the query service's viewpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    id: String,
    display_name: String,
    avatar_url: String,
    home_region: String,
    /// Achievement descriptions, order not significant.
    #[serde(default)]
    achievements: Vec<String>,
}

/// A score joined with its resolved profile.
///
/// Only produced when resolution succeeded; a missing profile fails the
/// whole aggregate rather than fabricating a placeholder.
#[derive(Debug, Clone, Getters, new)]
pub struct ScoreProfile {
    score: Score,
    profile: Profile,
}

/// One rendered page of the leaderboard: the total match count for
/// pagination math plus the joined rows in rank order.
#[derive(Debug, Clone, Getters, new)]
pub struct LeaderboardPage {
    total_results: u64,
    rows: Vec<ScoreProfile>,
}
