//! Integration tests for `reset_all`.

mod common;

use std::io::Write;

use assert_matches::assert_matches;
use common::{catalog, fight, init_tracing, new_meal, test_config};
use mealmax_db::{CatalogError, ErrorKind, MealCatalog};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_all_empties_the_catalog(pool: SqlitePool) {
    let catalog = catalog(pool.clone());
    let a = catalog.create(&new_meal("Meal A")).await.unwrap();
    let b = catalog.create(&new_meal("Meal B")).await.unwrap();
    fight(&catalog, a, 2, 0).await;
    catalog.soft_delete(b).await.unwrap();

    catalog.reset_all().await.unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM meals")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "deleted and active rows are both gone");
    assert!(catalog.leaderboard("wins").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_names_are_reusable_after_reset(pool: SqlitePool) {
    let catalog = catalog(pool);
    catalog.create(&new_meal("Meal A")).await.unwrap();

    catalog.reset_all().await.unwrap();

    let id = catalog.create(&new_meal("Meal A")).await.unwrap();
    assert_eq!(catalog.get_by_id(id).await.unwrap().meal, "Meal A");
}

/// A schema script without CHECK constraints and with an extra column.
fn unchecked_script() -> tempfile::NamedTempFile {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    write!(
        script,
        "DROP TABLE IF EXISTS meals;
         CREATE TABLE meals (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             meal TEXT NOT NULL UNIQUE,
             cuisine TEXT NOT NULL,
             price REAL NOT NULL,
             difficulty TEXT NOT NULL,
             battles INTEGER NOT NULL DEFAULT 0,
             wins INTEGER NOT NULL DEFAULT 0,
             deleted BOOLEAN NOT NULL DEFAULT FALSE,
             note TEXT
         );"
    )
    .unwrap();
    script
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_all_uses_configured_script(pool: SqlitePool) {
    init_tracing();
    let script = unchecked_script();

    let config = test_config().with_schema_script_path(script.path());
    let catalog = MealCatalog::new(pool.clone(), &config);
    assert_eq!(catalog.schema_script_path(), script.path());

    catalog.reset_all().await.unwrap();

    let has_note: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM pragma_table_info('meals') WHERE name = 'note'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(has_note.0, 1);
}

/// Lookups return stored rows as they are; only caller input is validated.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_returns_stored_row_without_revalidating(pool: SqlitePool) {
    init_tracing();
    let script = unchecked_script();
    let config = test_config().with_schema_script_path(script.path());
    let catalog = MealCatalog::new(pool.clone(), &config);
    catalog.reset_all().await.unwrap();

    sqlx::query(
        "INSERT INTO meals (meal, cuisine, price, difficulty) VALUES ('Free', 'Any', 0, 'LOW')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let summary = catalog.get_by_name("Free").await.unwrap();
    assert_eq!(summary.price, 0.0);
    assert_eq!(catalog.get_by_id(summary.id).await.unwrap(), summary);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_script_is_storage_error(pool: SqlitePool) {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.sql");
    let config = test_config().with_schema_script_path(&missing);
    let catalog = MealCatalog::new(pool, &config);
    let id = catalog.create(&new_meal("Meal A")).await.unwrap();

    let err = catalog.reset_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_matches!(err, CatalogError::SchemaScript { ref path, .. } if path == &missing);

    // Nothing was touched.
    assert!(catalog.get_by_id(id).await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_broken_script_rolls_back(pool: SqlitePool) {
    init_tracing();
    let mut script = tempfile::NamedTempFile::new().unwrap();
    write!(script, "DROP TABLE meals; CREATE TABLE").unwrap();

    let config = test_config().with_schema_script_path(script.path());
    let catalog = MealCatalog::new(pool, &config);
    let id = catalog.create(&new_meal("Meal A")).await.unwrap();

    let err = catalog.reset_all().await.unwrap_err();
    assert_matches!(err, CatalogError::Storage(_));

    assert!(catalog.get_by_id(id).await.is_ok(), "table survives a failed reset");
}
