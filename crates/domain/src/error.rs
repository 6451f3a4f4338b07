//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LattError`]
//! via `#[from]` (or an explicit `From` impl for adapter-private types).
//! The variant carries the failure class the caller needs for its own
//! mapping (HTTP status, retry decision); the source error rides along for
//! logging.

use std::fmt;

/// Top-level error enum shared by the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum LattError {
    /// Input failed a domain invariant before reaching the store.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced row does not exist.
    #[error("entity not found")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness constraint rejected the write and the bounded retry
    /// did not recover.
    #[error("uniqueness conflict")]
    Conflict(#[from] ConflictError),

    /// A foreign-key constraint rejected the write.
    #[error("foreign key violation")]
    ForeignKey(#[from] ForeignKeyError),

    /// The store could not be reached or the operation timed out.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// A price was below zero.
    #[error("price must not be negative")]
    NegativePrice,

    /// An email address was empty or missing an `@`.
    #[error("email address is malformed")]
    InvalidEmail,

    /// An identifier string did not parse as a UUID.
    #[error("malformed identifier")]
    MalformedId,
}

/// A lookup or delete referenced a row that does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Entity kind, e.g. `"Subscription"`.
    pub entity: &'static str,
    /// The identifier that missed.
    pub id: String,
}

/// A unique constraint fired and could not be resolved.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with key {key:?} already exists")]
pub struct ConflictError {
    /// Entity kind, e.g. `"Service"`.
    pub entity: &'static str,
    /// The natural key that collided.
    pub key: String,
}

/// A write referenced a row that does not exist on the other side of a
/// foreign key.
#[derive(Debug, thiserror::Error)]
#[error("foreign key violation on {relation}")]
pub struct ForeignKeyError {
    /// The relation whose constraint fired, e.g. `"subscriptions"`.
    pub relation: &'static str,
}

impl LattError {
    /// Short machine-readable tag for the failure class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::ConstraintViolation,
            Self::ForeignKey(_) => ErrorKind::ForeignKeyViolation,
            Self::Storage(_) => ErrorKind::StoreUnavailable,
        }
    }
}

/// Failure classes, independent of the payload each variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    ConstraintViolation,
    ForeignKeyViolation,
    StoreUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::ConstraintViolation => "constraint_violation",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::StoreUnavailable => "store_unavailable",
        };
        f.write_str(tag)
    }
}
