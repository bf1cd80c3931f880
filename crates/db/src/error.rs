//! Error taxonomy for catalog operations.

use std::path::PathBuf;

use mealmax_core::error::CoreError;

/// Coarse classification every [`CatalogError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyDeleted,
    DuplicateName,
    Storage,
}

/// Error returned by [`MealCatalog`](crate::catalog::MealCatalog) operations.
///
/// Storage failures keep the original driver error so callers can tell an
/// outage apart from a domain rejection.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A domain-level error from `mealmax_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The schema script used to reset the table could not be read.
    #[error("Failed to read schema script {}: {source}", .path.display())]
    SchemaScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for catalog return values.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(core) => match core {
                CoreError::Validation(_) => ErrorKind::Validation,
                CoreError::NotFound { .. } => ErrorKind::NotFound,
                CoreError::AlreadyDeleted { .. } => ErrorKind::AlreadyDeleted,
                CoreError::DuplicateName { .. } => ErrorKind::DuplicateName,
            },
            Self::Storage(_) | Self::SchemaScript { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_storage(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

/// Returns `true` when a sqlx error is a unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
