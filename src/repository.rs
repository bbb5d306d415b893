//! The storage-agnostic read contract for leaderboard queries.

use async_trait::async_trait;

use crate::error::LeaderboardError;
use crate::models::{Profile, Score};

/// Filter over score records. Both fields absent means "match all".
///
/// Empty strings are normalized to `None` at construction, so the wildcard
/// shape cannot diverge between callers that pass `""` and callers that pass
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct ScoreFilter {
    mode: Option<String>,
    region: Option<String>,
}

impl ScoreFilter {
    /// Creates a filter, treating empty strings as wildcards.
    pub fn new(mode: impl Into<String>, region: impl Into<String>) -> Self {
        fn normalize(value: String) -> Option<String> {
            if value.is_empty() { None } else { Some(value) }
        }
        Self {
            mode: normalize(mode.into()),
            region: normalize(region.into()),
        }
    }

    /// The match-all filter.
    pub fn all() -> Self {
        Self::default()
    }

    /// Mode restriction, if any.
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Region restriction, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The filter predicate. The fixture backend uses this single function
    /// for both the paged fetch and the count so the two cannot diverge.
    pub fn matches(&self, score: &Score) -> bool {
        self.mode.as_deref().is_none_or(|m| score.game_mode() == m)
            && self
                .region
                .as_deref()
                .is_none_or(|r| score.game_region() == r)
    }
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Creates a page request. Validity is checked by [`Page::validate`]
    /// at the repository boundary, before any I/O.
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Maximum records on the page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rejects page number or size below 1. Repositories call this before
    /// touching the store; clamping is never an option.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidArgument`] for out-of-range values.
    pub fn validate(&self) -> Result<(), LeaderboardError> {
        if self.number < 1 {
            return Err(LeaderboardError::invalid_argument(format!(
                "page number must be >= 1, got {}",
                self.number
            )));
        }
        if self.size < 1 {
            return Err(LeaderboardError::invalid_argument(format!(
                "page size must be >= 1, got {}",
                self.size
            )));
        }
        Ok(())
    }

    /// Records to skip: `(number - 1) * size`. Never negative for a
    /// validated page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }

    /// Records to take.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// Read contract every leaderboard backend implements.
///
/// Ordering contract for [`get_scores`](Self::get_scores): high score
/// **descending**, ties broken by submission timestamp ascending, then score
/// identifier ascending. The tie-break is part of the contract so that tied
/// records never duplicate or vanish across adjacent pages, and so that both
/// backends return the same ordered identifier sequence for the same dataset.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Retrieves the profile with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::NotFound`] when no profile has the
    /// identifier. Never returns a partially populated profile.
    async fn get_profile(&self, profile_id: &str) -> Result<Profile, LeaderboardError>;

    /// Retrieves at most one page of scores matching the filter, in rank
    /// order. A page past the end of the results is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::InvalidArgument`] for an invalid page
    /// before any I/O is attempted.
    async fn get_scores(
        &self,
        filter: &ScoreFilter,
        page: &Page,
    ) -> Result<Vec<Score>, LeaderboardError>;

    /// Counts all scores matching the filter, independent of pagination.
    /// Applies the identical predicate as [`get_scores`](Self::get_scores).
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the store cannot be queried.
    async fn count_scores(&self, filter: &ScoreFilter) -> Result<u64, LeaderboardError>;
}
