//! Meal catalog vocabulary: difficulty levels, battle outcomes, leaderboard
//! sort keys, the deletion lifecycle, and the validation helpers shared by
//! the persistence layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Entity name used in error messages and log fields.
pub const MEAL_ENTITY: &str = "Meal";

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

pub const DIFFICULTY_LOW: &str = "LOW";
pub const DIFFICULTY_MED: &str = "MED";
pub const DIFFICULTY_HIGH: &str = "HIGH";

pub const VALID_DIFFICULTIES: &[&str] = &[DIFFICULTY_LOW, DIFFICULTY_MED, DIFFICULTY_HIGH];

/// Preparation difficulty of a meal, stored as `LOW` / `MED` / `HIGH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            DIFFICULTY_LOW => Ok(Self::Low),
            DIFFICULTY_MED => Ok(Self::Med),
            DIFFICULTY_HIGH => Ok(Self::High),
            _ => Err(format!(
                "Invalid difficulty level: {s}. Must be one of: {}",
                VALID_DIFFICULTIES.join(", ")
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => DIFFICULTY_LOW,
            Self::Med => DIFFICULTY_MED,
            Self::High => DIFFICULTY_HIGH,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(CoreError::Validation)
    }
}

/// Lets row decoders read the `difficulty` TEXT column straight into the enum.
impl TryFrom<String> for Difficulty {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Battle outcome
// ---------------------------------------------------------------------------

pub const OUTCOME_WIN: &str = "win";
pub const OUTCOME_LOSS: &str = "loss";

/// Result of a single battle from one meal's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            OUTCOME_WIN => Ok(Self::Win),
            OUTCOME_LOSS => Ok(Self::Loss),
            _ => Err(format!(
                "Invalid result: {s}. Expected '{OUTCOME_WIN}' or '{OUTCOME_LOSS}'."
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => OUTCOME_WIN,
            Self::Loss => OUTCOME_LOSS,
        }
    }

    /// How much `wins` grows for this outcome. `battles` always grows by one.
    pub fn win_increment(self) -> i64 {
        match self {
            Self::Win => 1,
            Self::Loss => 0,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BattleOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(CoreError::Validation)
    }
}

// ---------------------------------------------------------------------------
// Leaderboard sort key
// ---------------------------------------------------------------------------

pub const SORT_WINS: &str = "wins";
pub const SORT_WIN_PCT: &str = "win_pct";

/// Column the leaderboard is ranked by, always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            SORT_WINS => Ok(Self::Wins),
            SORT_WIN_PCT => Ok(Self::WinPct),
            _ => Err(format!(
                "Invalid sort_by parameter: {s}. Must be '{SORT_WINS}' or '{SORT_WIN_PCT}'."
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wins => SORT_WINS,
            Self::WinPct => SORT_WIN_PCT,
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(CoreError::Validation)
    }
}

// ---------------------------------------------------------------------------
// Deletion lifecycle
// ---------------------------------------------------------------------------

/// Deletion state of a stored meal.
///
/// The only transition is `Active -> Deleted`. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealState {
    Active,
    Deleted,
}

impl MealState {
    pub fn from_deleted_flag(deleted: bool) -> Self {
        if deleted {
            Self::Deleted
        } else {
            Self::Active
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that a meal price is a finite, strictly positive number.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid price: {price}. Price must be a positive number."
        )))
    }
}

/// Check a raw difficulty string, returning the parsed level.
pub fn validate_difficulty(difficulty: &str) -> Result<Difficulty, CoreError> {
    difficulty.parse()
}

// ---------------------------------------------------------------------------
// Win percentage
// ---------------------------------------------------------------------------

/// Round a win ratio (0.0..=1.0) to a percentage with one decimal place.
///
/// Halves round to even, so 1 win in 16 battles (6.25%) reports `6.2`.
pub fn ratio_to_percentage(ratio: f64) -> f64 {
    (ratio * 1000.0).round_ties_even() / 10.0
}

/// Win percentage for a battle record, or `None` when no battles were fought.
pub fn win_percentage(wins: i64, battles: i64) -> Option<f64> {
    if battles <= 0 {
        return None;
    }
    Some(ratio_to_percentage(wins as f64 / battles as f64))
}
