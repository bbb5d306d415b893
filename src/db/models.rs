//! Row and insertable models for the relational backend.
//!
//! Mapping between rows and domain entities is explicit and field-by-field
//! in both directions; columns are named in the diesel derives and checked
//! against [`schema`](crate::db::schema) at compile time.

use chrono::NaiveDateTime;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;
use crate::models::{Profile, Score};

/// A row of the `scores` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::scores)]
pub struct ScoreRow {
    id: String,
    profile_id: String,
    game_mode: String,
    game_region: String,
    high_score: i64,
    submitted_at: NaiveDateTime,
}

impl ScoreRow {
    /// Converts the row into the domain entity.
    pub fn into_score(self) -> Score {
        Score::new(
            self.id,
            self.profile_id,
            self.game_mode,
            self.game_region,
            self.high_score,
            self.submitted_at,
        )
    }
}

/// A row of the `profiles` table. Achievements live in their own tables and
/// are attached separately.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::profiles)]
pub struct ProfileRow {
    id: String,
    display_name: String,
    avatar_url: String,
    home_region: String,
}

impl ProfileRow {
    /// Converts the row plus its achievement descriptions into the domain
    /// entity.
    pub fn into_profile(self, achievements: Vec<String>) -> Profile {
        Profile::new(
            self.id,
            self.display_name,
            self.avatar_url,
            self.home_region,
            achievements,
        )
    }
}

/// Insertable score record, used by the ingestion path.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    id: String,
    profile_id: String,
    game_mode: String,
    game_region: String,
    high_score: i64,
    submitted_at: NaiveDateTime,
}

impl NewScore {
    /// Builds the insertable from a domain entity.
    pub fn from_score(score: &Score) -> Self {
        Self::new(
            score.id().clone(),
            score.profile_id().clone(),
            score.game_mode().clone(),
            score.game_region().clone(),
            *score.high_score(),
            *score.submitted_at(),
        )
    }
}

/// Insertable profile record.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::profiles)]
pub struct NewProfile {
    id: String,
    display_name: String,
    avatar_url: String,
    home_region: String,
}

impl NewProfile {
    /// Builds the insertable from a domain entity. Achievements are inserted
    /// separately through the membership table.
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(
            profile.id().clone(),
            profile.display_name().clone(),
            profile.avatar_url().clone(),
            profile.home_region().clone(),
        )
    }
}

/// Insertable achievement description.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::achievements)]
pub struct NewAchievement {
    description: String,
}

/// Insertable profile-to-achievement membership row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::profile_achievements)]
pub struct NewProfileAchievement {
    profile_id: String,
    achievement_id: i32,
}
