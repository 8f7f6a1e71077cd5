//! Error handling for storagex-store
//!
//! Wraps storagex-core ExError with store-specific helpers

use storagex_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a storage access error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::StorageAccess)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a too-many-results error for an identifier lookup
pub fn too_many_results(table: &str, id: &str, rows: usize) -> ExError {
    ExError::new(ExErrorKind::TooManyResults)
        .with_op("find_by_id")
        .with_table(table)
        .with_entity_id(id)
        .with_message(format!("{} rows share one identifier", rows))
}

/// Create an invalid configuration error
pub fn invalid_config(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("configure")
        .with_message(reason)
}
