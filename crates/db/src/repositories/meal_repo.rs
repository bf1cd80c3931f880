//! Repository for the `meals` table.

use mealmax_core::meal::{BattleOutcome, LeaderboardSort, MealState};
use mealmax_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::meal::{Meal, NewMeal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, meal, cuisine, price, difficulty, battles, wins, deleted";

/// Filter for rows eligible for the leaderboard.
const RANKED_FILTER: &str = "deleted = FALSE AND battles > 0";

/// Provides SQL operations for meals.
pub struct MealRepo;

impl MealRepo {
    /// Insert a new meal, returning its id.
    ///
    /// Stats start at zero and `deleted` at false through column defaults.
    /// A duplicate name surfaces as the driver's unique-violation error.
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &NewMeal<'_>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO meals (meal, cuisine, price, difficulty)
             VALUES (?, ?, ?, ?)
             RETURNING id",
        )
        .bind(input.meal)
        .bind(input.cuisine)
        .bind(input.price)
        .bind(input.difficulty.as_str())
        .fetch_one(conn)
        .await
    }

    /// Find a meal by id, including soft-deleted rows.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Meal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meals WHERE id = ?");
        sqlx::query_as::<_, Meal>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a meal by exact name, including soft-deleted rows.
    pub async fn find_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Meal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meals WHERE meal = ?");
        sqlx::query_as::<_, Meal>(&query)
            .bind(name)
            .fetch_optional(conn)
            .await
    }

    /// Read only the deletion state of a meal. `None` if no row exists.
    pub async fn find_state(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<MealState>, sqlx::Error> {
        let deleted = sqlx::query_scalar::<_, bool>("SELECT deleted FROM meals WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(deleted.map(MealState::from_deleted_flag))
    }

    /// List active meals with at least one battle, best first.
    ///
    /// Ties keep ascending id order.
    pub async fn list_ranked(
        conn: &mut SqliteConnection,
        sort: LeaderboardSort,
    ) -> Result<Vec<Meal>, sqlx::Error> {
        let order = match sort {
            LeaderboardSort::Wins => "wins DESC",
            LeaderboardSort::WinPct => "(wins * 1.0 / battles) DESC",
        };
        let query =
            format!("SELECT {COLUMNS} FROM meals WHERE {RANKED_FILTER} ORDER BY {order}, id ASC");
        sqlx::query_as::<_, Meal>(&query).fetch_all(conn).await
    }

    /// Soft-delete a meal by id. Returns `true` if an active row was marked deleted.
    pub async fn soft_delete(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE meals SET deleted = TRUE WHERE id = ? AND deleted = FALSE")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record one battle for an active meal. Returns `true` if a row was updated.
    ///
    /// `battles` always grows by one; `wins` only on a win. Both change in
    /// the same statement.
    pub async fn record_battle(
        conn: &mut SqliteConnection,
        id: DbId,
        outcome: BattleOutcome,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE meals SET battles = battles + 1, wins = wins + ?
             WHERE id = ? AND deleted = FALSE",
        )
        .bind(outcome.win_increment())
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Run a DDL script that drops and recreates the table.
    pub async fn recreate_table(
        conn: &mut SqliteConnection,
        script: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(script).execute(&mut *conn).await?;
        Ok(())
    }
}
