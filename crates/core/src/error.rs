use crate::types::DbId;

/// Domain errors raised by the meal catalog.
///
/// Storage failures are deliberately absent: the persistence layer wraps
/// these together with the raw driver error so callers can tell a domain
/// rejection from an outage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} with {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} with id {id} has already been deleted")]
    AlreadyDeleted { entity: &'static str, id: DbId },

    #[error("{entity} with name '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },
}

impl CoreError {
    /// Not-found error keyed by a numeric id.
    pub fn not_found_id(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }

    /// Not-found error keyed by a name.
    pub fn not_found_name(entity: &'static str, name: &str) -> Self {
        Self::NotFound {
            entity,
            key: format!("name '{name}'"),
        }
    }
}
