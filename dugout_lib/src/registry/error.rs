use thiserror::Error;

/// Errors from player directory operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry request failed with status {0}")]
    HttpStatus(u16),
    #[error("Failed to parse registry response: {0}")]
    ParseFailed(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
