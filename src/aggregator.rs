//! Request-scoped orchestration: count + fetch + per-score profile lookups,
//! joined into one leaderboard page.

use std::sync::Arc;

use futures::future;
use tracing::{debug, info, instrument};

use crate::error::LeaderboardError;
use crate::models::{LeaderboardPage, Profile, ScoreProfile};
use crate::repository::{LeaderboardRepository, Page, ScoreFilter};

/// Aggregation service over whichever backend was configured at startup.
///
/// Holds the repository behind an [`Arc`] so clones share the backend; the
/// service itself carries no other state.
#[derive(Clone)]
pub struct Leaderboard {
    repository: Arc<dyn LeaderboardRepository>,
}

impl Leaderboard {
    /// Creates the service over a fully-configured repository.
    pub fn new(repository: Arc<dyn LeaderboardRepository>) -> Self {
        info!("Creating Leaderboard service");
        Self { repository }
    }

    /// Runs one leaderboard query: total count, one page of scores, and the
    /// profile for every score on the page, joined in rank order.
    ///
    /// The count and the score fetch are independent reads and run
    /// concurrently. Profile lookups fan out concurrently as well - one
    /// in-flight lookup per score on the page, so the ceiling is the page
    /// size - and the first failure cancels the rest. A row is never
    /// returned with a fabricated profile: any failed lookup fails the
    /// whole aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidArgument`] for an invalid page
    /// before any I/O, and propagates any repository failure, including
    /// [`LeaderboardError::NotFound`] for a score whose profile is missing.
    #[instrument(skip(self, filter, page), fields(
        mode = ?filter.mode(),
        region = ?filter.region(),
        page = page.number(),
        page_size = page.size(),
    ))]
    pub async fn query(
        &self,
        filter: &ScoreFilter,
        page: &Page,
    ) -> Result<LeaderboardPage, LeaderboardError> {
        page.validate()?;

        let (total_results, scores) = tokio::try_join!(
            self.repository.count_scores(filter),
            self.repository.get_scores(filter, page),
        )?;
        debug!(
            total_results,
            page_scores = scores.len(),
            "Count and score fetch complete"
        );

        let lookups = scores
            .iter()
            .map(|score| self.repository.get_profile(score.profile_id()));
        let profiles = future::try_join_all(lookups).await?;

        let rows = scores
            .into_iter()
            .zip(profiles)
            .map(|(score, profile)| {
                // Each lookup was keyed by the score's profile id; a backend
                // answering with a different profile is a dataset fault.
                if profile.id() != score.profile_id() {
                    return Err(LeaderboardError::data_integrity(format!(
                        "profile lookup for score '{}' returned profile '{}', expected '{}'",
                        score.id(),
                        profile.id(),
                        score.profile_id()
                    )));
                }
                Ok(ScoreProfile::new(score, profile))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(total_results, rows = rows.len(), "Leaderboard page assembled");
        Ok(LeaderboardPage::new(total_results, rows))
    }

    /// Looks up a single profile, for the profile-detail screen.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotFound`] when the profile does not
    /// exist.
    #[instrument(skip(self))]
    pub async fn profile_detail(&self, profile_id: &str) -> Result<Profile, LeaderboardError> {
        debug!(profile_id = %profile_id, "Fetching profile detail");
        self.repository.get_profile(profile_id).await
    }
}
