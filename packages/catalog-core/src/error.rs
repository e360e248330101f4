//! Catalog error types.

use thiserror::Error;

/// Catalog operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No record with the given identity exists
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// A field failed a bounded-range or domain rule
    #[error("{0}")]
    Validation(&'static str),

    /// A foreign-key field references a row that does not exist
    #[error("{entity}.{field} references missing {target} {id}")]
    DanglingReference {
        entity: &'static str,
        field: &'static str,
        target: &'static str,
        id: u64,
    },

    /// I/O error during snapshot persistence
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl CatalogError {
    /// Shorthand for a not-found error on the given entity kind.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        CatalogError::NotFound { entity, id }
    }
}
