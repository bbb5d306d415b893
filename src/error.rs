//! Error taxonomy for the leaderboard query service.

use derive_more::{Display, Error};

/// Failure classes surfaced by repositories and the aggregator.
///
/// Every failure carries enough context (operation subject, identifier) for
/// the caller to distinguish a missing record from a dataset defect or an
/// unreachable store. Nothing in this crate logs-and-swallows; errors
/// propagate to the presentation boundary, which decides what to render.
#[derive(Debug, Clone, Display, Error)]
pub enum LeaderboardError {
    /// A requested record does not exist.
    #[display("{entity} '{id}' not found")]
    NotFound {
        /// Kind of record looked up (e.g. "profile").
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A caller-supplied argument was rejected before any I/O.
    #[display("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// The dataset violates an invariant (duplicate identifiers, orphaned
    /// references, achievement-count mismatch). Distinct from [`Self::NotFound`]:
    /// the data is broken, not merely absent.
    #[display("data integrity violation: {message}")]
    DataIntegrity {
        /// Description of the violated invariant.
        message: String,
    },

    /// The underlying store could not be reached, read, or parsed.
    #[display("backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the store fault.
        message: String,
    },
}

impl LeaderboardError {
    /// A missing record of the given kind.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// A rejected caller argument.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// A dataset invariant violation.
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            message: message.into(),
        }
    }

    /// An unreachable or unreadable backend.
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
        }
    }
}

// Store faults map into the taxonomy. Call sites that can distinguish a
// missing row use `.optional()` and build `NotFound` themselves, so a diesel
// error reaching these conversions is a backend fault, not a lookup miss.
impl From<diesel::result::Error> for LeaderboardError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::data_integrity(format!("unique constraint violated: {}", info.message())),
            other => Self::backend_unavailable(format!("query failed: {other}")),
        }
    }
}

impl From<diesel::ConnectionError> for LeaderboardError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::backend_unavailable(format!("connection failed: {err}"))
    }
}

impl From<std::io::Error> for LeaderboardError {
    fn from(err: std::io::Error) -> Self {
        Self::backend_unavailable(format!("read failed: {err}"))
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::backend_unavailable(format!("parse failed: {err}"))
    }
}
