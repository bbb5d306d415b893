//! SQLite-backed leaderboard repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::{
    NewAchievement, NewProfile, NewProfileAchievement, NewScore, ProfileRow, ScoreRow,
};
use crate::db::schema;
use crate::error::LeaderboardError;
use crate::models::{Profile, Score};
use crate::repository::{LeaderboardRepository, Page, ScoreFilter};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A boxed WHERE predicate over the `scores` table. Built once per request
/// and applied to both the paged fetch and the count, so the two queries can
/// never disagree about what matches.
type ScorePredicate = Box<dyn BoxableExpression<schema::scores::table, Sqlite, SqlType = Bool>>;

/// Leaderboard repository backed by a SQLite database.
///
/// Each logical operation establishes its own connection and releases it on
/// every exit path; nothing holds a connection across an await point.
/// Blocking diesel work runs on the tokio blocking pool, so callers may drop
/// the returned future to abandon an operation.
#[derive(Debug, Clone)]
pub struct DieselRepository {
    db_path: String,
}

impl DieselRepository {
    /// Creates a repository reading from the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating DieselRepository");
        Self { db_path }
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::BackendUnavailable`] if the database
    /// cannot be opened or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), LeaderboardError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            LeaderboardError::backend_unavailable(format!("migration failed: {e}"))
        })?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection for one logical operation.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, LeaderboardError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            LeaderboardError::backend_unavailable(format!(
                "failed to connect to '{}': {e}",
                self.db_path
            ))
        })
    }

    /// Builds the WHERE predicate for a filter: one distinct shape per
    /// populated-field combination, every value a bound parameter.
    fn predicate(filter: &ScoreFilter) -> Option<ScorePredicate> {
        use schema::scores::dsl::{game_mode, game_region};

        match (filter.mode(), filter.region()) {
            (None, None) => None,
            (Some(mode), None) => Some(Box::new(game_mode.eq(mode.to_owned()))),
            (None, Some(region)) => Some(Box::new(game_region.eq(region.to_owned()))),
            (Some(mode), Some(region)) => Some(Box::new(
                game_mode
                    .eq(mode.to_owned())
                    .and(game_region.eq(region.to_owned())),
            )),
        }
    }

    fn get_profile_blocking(&self, profile_id: &str) -> Result<Profile, LeaderboardError> {
        let mut conn = self.connection()?;

        let row: Option<ProfileRow> = schema::profiles::table
            .find(profile_id.to_owned())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()?;
        let Some(row) = row else {
            return Err(LeaderboardError::not_found("profile", profile_id));
        };

        // Membership rows counted without the join; descriptions loaded
        // through it. A dangling membership row makes the two disagree.
        let expected: i64 = schema::profile_achievements::table
            .filter(schema::profile_achievements::profile_id.eq(profile_id.to_owned()))
            .count()
            .get_result(&mut conn)?;
        let descriptions: Vec<String> = schema::profile_achievements::table
            .inner_join(schema::achievements::table)
            .filter(schema::profile_achievements::profile_id.eq(profile_id.to_owned()))
            .select(schema::achievements::description)
            .order(schema::achievements::id.asc())
            .load(&mut conn)?;

        if descriptions.len() as i64 != expected {
            return Err(LeaderboardError::data_integrity(format!(
                "profile '{profile_id}' has {expected} achievement rows but {} descriptions",
                descriptions.len()
            )));
        }

        Ok(row.into_profile(descriptions))
    }

    fn get_scores_blocking(
        &self,
        filter: &ScoreFilter,
        page: &Page,
    ) -> Result<Vec<Score>, LeaderboardError> {
        use schema::scores::dsl::{high_score, id, submitted_at};

        let mut conn = self.connection()?;

        let mut query = schema::scores::table
            .select(ScoreRow::as_select())
            .into_boxed();
        if let Some(predicate) = Self::predicate(filter) {
            query = query.filter(predicate);
        }

        let rows: Vec<ScoreRow> = query
            .order((high_score.desc(), submitted_at.asc(), id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)?;

        debug!(count = rows.len(), "Score page loaded");
        Ok(rows.into_iter().map(ScoreRow::into_score).collect())
    }

    fn count_scores_blocking(&self, filter: &ScoreFilter) -> Result<u64, LeaderboardError> {
        let mut conn = self.connection()?;

        let mut query = schema::scores::table.count().into_boxed::<Sqlite>();
        if let Some(predicate) = Self::predicate(filter) {
            query = query.filter(predicate);
        }

        let count: i64 = query.get_result(&mut conn)?;
        debug!(count, "Scores counted");
        Ok(count as u64)
    }

    /// Inserts a profile and its achievement descriptions atomically.
    ///
    /// Part of the ingestion path, not the read contract; the leaderboard
    /// query service itself never mutates the store.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the insert fails (e.g. a duplicate
    /// identifier).
    #[instrument(skip(self, profile), fields(profile_id = %profile.id()))]
    pub fn insert_profile(&self, profile: &Profile) -> Result<(), LeaderboardError> {
        debug!("Inserting profile");
        let mut conn = self.connection()?;

        conn.transaction::<_, LeaderboardError, _>(|conn| {
            diesel::insert_into(schema::profiles::table)
                .values(NewProfile::from_profile(profile))
                .execute(conn)?;

            for description in profile.achievements() {
                let achievement_id: i32 = diesel::insert_into(schema::achievements::table)
                    .values(NewAchievement::new(description.clone()))
                    .returning(schema::achievements::id)
                    .get_result(conn)?;
                diesel::insert_into(schema::profile_achievements::table)
                    .values(NewProfileAchievement::new(
                        profile.id().clone(),
                        achievement_id,
                    ))
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!(profile_id = %profile.id(), "Profile inserted");
        Ok(())
    }

    /// Inserts a score record. Ingestion path only.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the insert fails.
    #[instrument(skip(self, score), fields(score_id = %score.id()))]
    pub fn insert_score(&self, score: &Score) -> Result<(), LeaderboardError> {
        debug!("Inserting score");
        let mut conn = self.connection()?;

        diesel::insert_into(schema::scores::table)
            .values(NewScore::from_score(score))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn run_blocking<T, F>(task: F) -> Result<T, LeaderboardError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, LeaderboardError> + Send + 'static,
    {
        tokio::task::spawn_blocking(task).await.map_err(|e| {
            LeaderboardError::backend_unavailable(format!("blocking task failed: {e}"))
        })?
    }
}

#[async_trait]
impl LeaderboardRepository for DieselRepository {
    #[instrument(skip(self))]
    async fn get_profile(&self, profile_id: &str) -> Result<Profile, LeaderboardError> {
        debug!(profile_id = %profile_id, "Looking up profile");
        let repo = self.clone();
        let profile_id = profile_id.to_owned();
        Self::run_blocking(move || repo.get_profile_blocking(&profile_id)).await
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
        let repo = self.clone();
        let filter = filter.clone();
        let page = *page;
        Self::run_blocking(move || repo.get_scores_blocking(&filter, &page)).await
    }

    #[instrument(skip(self, filter), fields(mode = ?filter.mode(), region = ?filter.region()))]
    async fn count_scores(&self, filter: &ScoreFilter) -> Result<u64, LeaderboardError> {
        let repo = self.clone();
        let filter = filter.clone();
        Self::run_blocking(move || repo.count_scores_blocking(&filter)).await
    }
}
