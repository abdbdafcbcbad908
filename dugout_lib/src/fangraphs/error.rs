use thiserror::Error;

/// Errors from season aggregate operations.
#[derive(Error, Debug)]
pub enum FangraphsError {
    #[error("Season aggregate request failed with status {0}")]
    HttpStatus(u16),
    #[error("Failed to parse season aggregate response: {0}")]
    ParseFailed(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
