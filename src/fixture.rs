//! Fixture-backed repository: a fixed dataset loaded once and served from
//! memory, used for offline and demo operation.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::LeaderboardError;
use crate::models::{Profile, Score};
use crate::repository::{LeaderboardRepository, Page, ScoreFilter};

/// Repository over two in-memory datasets deserialized from JSON documents
/// at construction.
///
/// The datasets are read-only for the lifetime of the instance, so
/// concurrent queries need no synchronization.
#[derive(Debug, Clone)]
pub struct FixtureRepository {
    scores: Vec<Score>,
    profiles: Vec<Profile>,
}

impl FixtureRepository {
    /// Loads the score and profile datasets from the given JSON files.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::BackendUnavailable`] if either file
    /// cannot be read or parsed, and [`LeaderboardError::DataIntegrity`] if
    /// either dataset contains duplicate identifiers.
    #[instrument(skip(scores_path, profiles_path), fields(
        scores_path = %scores_path.as_ref().display(),
        profiles_path = %profiles_path.as_ref().display(),
    ))]
    pub fn load(
        scores_path: impl AsRef<Path>,
        profiles_path: impl AsRef<Path>,
    ) -> Result<Self, LeaderboardError> {
        debug!("Loading fixture datasets");
        let scores: Vec<Score> = serde_json::from_str(&std::fs::read_to_string(scores_path)?)?;
        let profiles: Vec<Profile> =
            serde_json::from_str(&std::fs::read_to_string(profiles_path)?)?;
        Self::from_parts(scores, profiles)
    }

    /// Builds a repository from already-materialized datasets, enforcing
    /// identifier uniqueness in each.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::DataIntegrity`] on duplicate score or
    /// profile identifiers.
    pub fn from_parts(
        scores: Vec<Score>,
        profiles: Vec<Profile>,
    ) -> Result<Self, LeaderboardError> {
        let mut seen = HashSet::new();
        for score in &scores {
            if !seen.insert(score.id().as_str()) {
                return Err(LeaderboardError::data_integrity(format!(
                    "duplicate score id '{}' in fixture data",
                    score.id()
                )));
            }
        }
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.id().as_str()) {
                return Err(LeaderboardError::data_integrity(format!(
                    "duplicate profile id '{}' in fixture data",
                    profile.id()
                )));
            }
        }

        info!(
            scores = scores.len(),
            profiles = profiles.len(),
            "Fixture datasets loaded"
        );
        Ok(Self { scores, profiles })
    }

    /// The full score dataset, unfiltered and unsorted.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// The full profile dataset.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Rank order: high score descending, then submission timestamp
    /// ascending, then id ascending.
    fn rank_order(a: &Score, b: &Score) -> Ordering {
        b.high_score()
            .cmp(a.high_score())
            .then_with(|| a.submitted_at().cmp(b.submitted_at()))
            .then_with(|| a.id().cmp(b.id()))
    }
}

#[async_trait]
impl LeaderboardRepository for FixtureRepository {
    #[instrument(skip(self))]
    async fn get_profile(&self, profile_id: &str) -> Result<Profile, LeaderboardError> {
        debug!(profile_id = %profile_id, "Looking up profile in fixture data");
        let mut matches = self.profiles.iter().filter(|p| p.id() == profile_id);

        let Some(profile) = matches.next() else {
            return Err(LeaderboardError::not_found("profile", profile_id));
        };
        // More than one profile sharing an id is a broken dataset, never a
        // silent first-match pick.
        if matches.next().is_some() {
            return Err(LeaderboardError::data_integrity(format!(
                "multiple profiles share id '{profile_id}'"
            )));
        }

        Ok(profile.clone())
    }

    #[instrument(skip(self, filter, page), fields(
        mode = ?filter.mode(),
        region = ?filter.region(),
        page = page.number(),
        page_size = page.size(),
    ))]
    async fn get_scores(
        &self,
        filter: &ScoreFilter,
        page: &Page,
    ) -> Result<Vec<Score>, LeaderboardError> {
        page.validate()?;

        let mut matching: Vec<&Score> =
            self.scores.iter().filter(|s| filter.matches(s)).collect();
        matching.sort_by(|a, b| Self::rank_order(a, b));

        let scores: Vec<Score> = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .cloned()
            .collect();

        debug!(count = scores.len(), "Fixture scores page assembled");
        Ok(scores)
    }

    #[instrument(skip(self, filter), fields(mode = ?filter.mode(), region = ?filter.region()))]
    async fn count_scores(&self, filter: &ScoreFilter) -> Result<u64, LeaderboardError> {
        // Same predicate as get_scores; no sort needed for a count.
        let count = self.scores.iter().filter(|s| filter.matches(s)).count();
        debug!(count, "Fixture scores counted");
        Ok(count as u64)
    }
}
