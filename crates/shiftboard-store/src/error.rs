use thiserror::Error;

/// Errors raised by the persistence layer. The gateway maps each variant to
/// an HTTP status.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched (unknown volunteer, nothing to delete).
    #[error("not found: {0}")]
    NotFound(String),

    /// Input rejected before touching the database.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// A stored value could not be read back into its domain type.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
