//! Domain types and validation rules for the meal catalog.
//!
//! Nothing in this crate touches the database; see `mealmax-db` for the
//! persistence layer.

pub mod error;
pub mod meal;
pub mod types;
