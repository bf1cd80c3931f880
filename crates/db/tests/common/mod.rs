#![allow(dead_code)]

use mealmax_db::models::meal::CreateMeal;
use mealmax_db::{CatalogConfig, MealCatalog};
use sqlx::SqlitePool;

/// DDL script checked into the repository, used by `reset_all`.
pub const SCHEMA_SCRIPT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../db/sql/create_meal_table.sql"
);

/// Install a test-writer subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealmax_db=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Build a `CatalogConfig` pointing at the repository schema script.
pub fn test_config() -> CatalogConfig {
    CatalogConfig::default().with_schema_script_path(SCHEMA_SCRIPT)
}

/// Build a catalog over the per-test pool.
pub fn catalog(pool: SqlitePool) -> MealCatalog {
    init_tracing();
    MealCatalog::new(pool, &test_config())
}

pub fn new_meal(name: &str) -> CreateMeal {
    CreateMeal::new(name, "Cuisine A", 20.0, "HIGH")
}

/// Record `wins` wins and `losses` losses for a meal.
pub async fn fight(catalog: &MealCatalog, id: i64, wins: usize, losses: usize) {
    for _ in 0..wins {
        catalog.update_stats(id, "win").await.unwrap();
    }
    for _ in 0..losses {
        catalog.update_stats(id, "loss").await.unwrap();
    }
}
