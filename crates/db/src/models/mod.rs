//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - A `Deserialize` create DTO for inserts, plus its validated form

pub mod meal;
