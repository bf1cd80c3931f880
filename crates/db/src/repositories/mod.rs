//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async SQL methods that
//! accept `&mut SqliteConnection` as the first argument, so callers decide
//! whether a call runs on a plain pooled connection or inside a transaction.

pub mod meal_repo;

pub use meal_repo::MealRepo;
