//! Storage-specific error type and sqlx error classification.

use latt_domain::error::{ConflictError, ForeignKeyError, LattError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to decode a stored value into a domain type.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for LattError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Classify a write failure: unique violations become [`LattError::Conflict`]
/// on the given entity/key, foreign-key violations become
/// [`LattError::ForeignKey`] on the given relation, everything else is a
/// storage failure.
pub(crate) fn classify_write_error(
    err: sqlx::Error,
    entity: &'static str,
    key: &str,
    relation: &'static str,
) -> LattError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return ConflictError {
                entity,
                key: key.to_string(),
            }
            .into();
        }
        if db_err.is_foreign_key_violation() {
            return ForeignKeyError { relation }.into();
        }
    }
    StorageError::Database(err).into()
}
