use thiserror::Error;

/// Failure of one REST call, classified the way callers react to it:
/// bad input (400), nothing matched (404), or the server/network itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Connection refused, timed out, or otherwise never reached the server.
    #[error("Server unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
