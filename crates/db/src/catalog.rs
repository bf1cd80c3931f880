//! The meal catalog store.
//!
//! Wraps [`MealRepo`] with input validation, error classification and
//! logging. Each public operation borrows a single connection (or opens a
//! single transaction) from the caller's pool and returns it on every exit
//! path. Nothing is cached.

use std::future::Future;
use std::path::{Path, PathBuf};

use mealmax_core::error::CoreError;
use mealmax_core::meal::{BattleOutcome, LeaderboardSort, MEAL_ENTITY};
use mealmax_core::types::DbId;
use tracing::{Instrument, Span};

use crate::config::CatalogConfig;
use crate::error::{is_unique_violation, CatalogError, CatalogResult, ErrorKind};
use crate::models::meal::{CreateMeal, LeaderboardEntry, Meal, MealSummary};
use crate::repositories::MealRepo;
use crate::DbPool;

/// Create, look up, rank and soft-delete meals.
///
/// Cloning is cheap; clones share the pool and the logging span.
#[derive(Debug, Clone)]
pub struct MealCatalog {
    pool: DbPool,
    schema_script_path: PathBuf,
    span: Span,
}

impl MealCatalog {
    /// Build a catalog over `pool`, logging under a fresh `meal_catalog` span.
    pub fn new(pool: DbPool, config: &CatalogConfig) -> Self {
        Self::with_span(pool, config, tracing::info_span!("meal_catalog"))
    }

    /// Build a catalog whose log events are all parented to `span`.
    pub fn with_span(pool: DbPool, config: &CatalogConfig, span: Span) -> Self {
        Self {
            pool,
            schema_script_path: config.schema_script_path.clone(),
            span,
        }
    }

    pub fn schema_script_path(&self) -> &Path {
        &self.schema_script_path
    }

    // ── Create ────────────────────────────────────────────────────────

    /// Insert a new meal and return its id.
    ///
    /// Price and difficulty are checked before touching storage. Name
    /// uniqueness is left to the table constraint.
    pub async fn create(&self, input: &CreateMeal) -> CatalogResult<DbId> {
        let span = tracing::info_span!(parent: &self.span, "create_meal", meal = %input.meal);
        observe(span, self.insert(input)).await
    }

    async fn insert(&self, input: &CreateMeal) -> CatalogResult<DbId> {
        let new_meal = input.validate()?;
        let mut conn = self.pool.acquire().await?;
        let id = MealRepo::create(&mut conn, &new_meal)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    CatalogError::Core(CoreError::DuplicateName {
                        entity: MEAL_ENTITY,
                        name: input.meal.clone(),
                    })
                } else {
                    CatalogError::Storage(err)
                }
            })?;
        tracing::info!(meal_id = id, "Meal added to the catalog");
        Ok(id)
    }

    // ── Reset ─────────────────────────────────────────────────────────

    /// Drop and recreate the `meals` table from the configured DDL script.
    ///
    /// Irreversible. Intended for tests and administration.
    pub async fn reset_all(&self) -> CatalogResult<()> {
        let span = tracing::info_span!(
            parent: &self.span,
            "reset_all",
            script = %self.schema_script_path.display()
        );
        observe(span, self.recreate()).await
    }

    async fn recreate(&self) -> CatalogResult<()> {
        let script = tokio::fs::read_to_string(&self.schema_script_path)
            .await
            .map_err(|source| CatalogError::SchemaScript {
                path: self.schema_script_path.clone(),
                source,
            })?;
        let mut tx = self.pool.begin().await?;
        MealRepo::recreate_table(&mut tx, &script).await?;
        tx.commit().await?;
        tracing::info!("Meals cleared");
        Ok(())
    }

    // ── Delete ────────────────────────────────────────────────────────

    /// Mark a meal as deleted. Deletion is permanent.
    ///
    /// Fails with not-found for unknown ids and already-deleted for meals
    /// that were deleted before.
    pub async fn soft_delete(&self, id: DbId) -> CatalogResult<()> {
        let span = tracing::info_span!(parent: &self.span, "soft_delete", meal_id = id);
        observe(span, self.mark_deleted(id)).await
    }

    async fn mark_deleted(&self, id: DbId) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;
        if MealRepo::soft_delete(&mut tx, id).await? {
            tx.commit().await?;
            tracing::info!("Meal marked as deleted");
            return Ok(());
        }

        // The conditional write skipped the row; find out why within the
        // same transaction.
        match MealRepo::find_state(&mut tx, id).await? {
            None => Err(CoreError::not_found_id(MEAL_ENTITY, id).into()),
            Some(_) => Err(CoreError::AlreadyDeleted {
                entity: MEAL_ENTITY,
                id,
            }
            .into()),
        }
    }

    // ── Leaderboard ───────────────────────────────────────────────────

    /// Rank active meals that have fought, sorting by `"wins"` or `"win_pct"`.
    pub async fn leaderboard(&self, sort_by: &str) -> CatalogResult<Vec<LeaderboardEntry>> {
        let span = tracing::info_span!(parent: &self.span, "leaderboard", sort_by = %sort_by);
        observe(span, async {
            match sort_by.parse::<LeaderboardSort>() {
                Ok(sort) => self.ranked(sort).await,
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    /// Rank active meals that have fought by a typed sort key.
    pub async fn leaderboard_by(
        &self,
        sort: LeaderboardSort,
    ) -> CatalogResult<Vec<LeaderboardEntry>> {
        let span = tracing::info_span!(parent: &self.span, "leaderboard", sort_by = %sort);
        observe(span, self.ranked(sort)).await
    }

    async fn ranked(&self, sort: LeaderboardSort) -> CatalogResult<Vec<LeaderboardEntry>> {
        let mut conn = self.pool.acquire().await?;
        let rows = MealRepo::list_ranked(&mut conn, sort).await?;
        let entries: Vec<LeaderboardEntry> =
            rows.into_iter().filter_map(LeaderboardEntry::from_meal).collect();
        tracing::info!(count = entries.len(), "Leaderboard retrieved");
        Ok(entries)
    }

    // ── Lookups ───────────────────────────────────────────────────────

    /// Fetch an active meal by id.
    ///
    /// Deleted meals are reported exactly like missing ones.
    pub async fn get_by_id(&self, id: DbId) -> CatalogResult<MealSummary> {
        let span = tracing::info_span!(parent: &self.span, "get_meal_by_id", meal_id = id);
        observe(span, self.find_active_by_id(id)).await
    }

    async fn find_active_by_id(&self, id: DbId) -> CatalogResult<MealSummary> {
        let mut conn = self.pool.acquire().await?;
        let row = MealRepo::find_by_id(&mut conn, id).await?;
        active_summary(row, || CoreError::not_found_id(MEAL_ENTITY, id))
    }

    /// Fetch an active meal by exact name.
    ///
    /// Deleted meals are reported exactly like missing ones.
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<MealSummary> {
        let span = tracing::info_span!(parent: &self.span, "get_meal_by_name", meal = %name);
        observe(span, self.find_active_by_name(name)).await
    }

    async fn find_active_by_name(&self, name: &str) -> CatalogResult<MealSummary> {
        let mut conn = self.pool.acquire().await?;
        let row = MealRepo::find_by_name(&mut conn, name).await?;
        active_summary(row, || CoreError::not_found_name(MEAL_ENTITY, name))
    }

    // ── Battle stats ──────────────────────────────────────────────────

    /// Record a battle result given as `"win"` or `"loss"`.
    pub async fn update_stats(&self, id: DbId, outcome: &str) -> CatalogResult<()> {
        let span = tracing::info_span!(
            parent: &self.span,
            "update_meal_stats",
            meal_id = id,
            outcome = %outcome
        );
        observe(span, async {
            match outcome.parse::<BattleOutcome>() {
                Ok(outcome) => self.apply_battle(id, outcome).await,
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    /// Record a typed battle result.
    pub async fn record_battle(&self, id: DbId, outcome: BattleOutcome) -> CatalogResult<()> {
        let span = tracing::info_span!(
            parent: &self.span,
            "update_meal_stats",
            meal_id = id,
            outcome = %outcome
        );
        observe(span, self.apply_battle(id, outcome)).await
    }

    async fn apply_battle(&self, id: DbId, outcome: BattleOutcome) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;
        if !MealRepo::record_battle(&mut tx, id, outcome).await? {
            return Err(CoreError::not_found_id(MEAL_ENTITY, id).into());
        }
        tx.commit().await?;
        tracing::info!("Meal stats updated");
        Ok(())
    }
}

/// Run `fut` inside `span` and log its failure, if any, in that span.
async fn observe<T>(
    span: Span,
    fut: impl Future<Output = CatalogResult<T>>,
) -> CatalogResult<T> {
    let result = fut.instrument(span.clone()).await;
    if let Err(err) = &result {
        span.in_scope(|| log_failure(err));
    }
    result
}

/// Turn a looked-up row into a summary, hiding deleted rows.
fn active_summary(
    row: Option<Meal>,
    not_found: impl FnOnce() -> CoreError,
) -> CatalogResult<MealSummary> {
    match row {
        Some(meal) if meal.state().is_active() => Ok(MealSummary::from(meal)),
        Some(_) => {
            tracing::info!("Meal has been deleted");
            Err(not_found().into())
        }
        None => Err(not_found().into()),
    }
}

fn log_failure(err: &CatalogError) {
    match err.kind() {
        ErrorKind::Storage => tracing::error!(error = %err, "Database error"),
        ErrorKind::Validation => tracing::warn!(error = %err, "Rejected invalid input"),
        ErrorKind::NotFound | ErrorKind::AlreadyDeleted | ErrorKind::DuplicateName => {
            tracing::info!(error = %err, "Meal operation refused")
        }
    }
}
