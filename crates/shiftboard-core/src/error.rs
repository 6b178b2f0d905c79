use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiftboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShiftboardError {
    /// Short error code string, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftboardError::Config(_) => "CONFIG_ERROR",
            ShiftboardError::InvalidDate(_) => "INVALID_DATE",
            ShiftboardError::Validation(_) => "VALIDATION_ERROR",
            ShiftboardError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShiftboardError>;
