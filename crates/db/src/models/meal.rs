//! Meal entity model and DTOs.

use mealmax_core::error::CoreError;
use mealmax_core::meal::{
    validate_difficulty, validate_price, win_percentage, Difficulty, MealState,
};
use mealmax_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `meals` table, including battle stats and the
/// soft-delete flag.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Meal {
    pub id: DbId,
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    pub deleted: bool,
}

impl Meal {
    pub fn state(&self) -> MealState {
        MealState::from_deleted_flag(self.deleted)
    }
}

/// Public view of a meal returned by point lookups. Battle stats and the
/// deletion flag are not exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSummary {
    pub id: DbId,
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
}

impl From<Meal> for MealSummary {
    fn from(row: Meal) -> Self {
        Self {
            id: row.id,
            meal: row.meal,
            cuisine: row.cuisine,
            price: row.price,
            difficulty: row.difficulty,
        }
    }
}

/// A ranked meal with its derived win percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    /// Percentage rounded to one decimal place. Never persisted.
    pub win_pct: f64,
}

impl LeaderboardEntry {
    /// Build an entry from a row that has fought at least one battle.
    ///
    /// Returns `None` for rows without battles; those never rank.
    pub fn from_meal(row: Meal) -> Option<Self> {
        let win_pct = win_percentage(row.wins, row.battles)?;
        Some(Self {
            id: row.id,
            meal: row.meal,
            cuisine: row.cuisine,
            price: row.price,
            difficulty: row.difficulty,
            battles: row.battles,
            wins: row.wins,
            win_pct,
        })
    }
}

/// DTO for creating a new meal. `difficulty` is raw text until validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeal {
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: String,
}

impl CreateMeal {
    pub fn new(
        meal: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            meal: meal.into(),
            cuisine: cuisine.into(),
            price,
            difficulty: difficulty.into(),
        }
    }

    /// Check price and difficulty, producing the insertable form.
    pub fn validate(&self) -> Result<NewMeal<'_>, CoreError> {
        validate_price(self.price)?;
        let difficulty = validate_difficulty(&self.difficulty)?;
        Ok(NewMeal {
            meal: &self.meal,
            cuisine: &self.cuisine,
            price: self.price,
            difficulty,
        })
    }
}

/// A validated insert, borrowed from a [`CreateMeal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMeal<'a> {
    pub meal: &'a str,
    pub cuisine: &'a str,
    pub price: f64,
    pub difficulty: Difficulty,
}
