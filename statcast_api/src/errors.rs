//! Error types for the statcast client.

/// Errors that can occur when fetching pitch logs.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The provider returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The CSV payload could not be parsed into pitch rows.
    #[error("Malformed CSV payload")]
    MalformedCsv,
}
