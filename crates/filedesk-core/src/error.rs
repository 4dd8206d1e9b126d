//! Error types for the file directory client.
//!
//! - [`TransferError`] - network and HTTP failures of any remote operation
//! - [`ValidationError`] - advisory findings about filter input (never enforced)
//! - [`DuplicateCheckFailure`] - a failed digest lookup; callers fail open

use thiserror::Error;

/// Network/HTTP failure of a remote directory operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to build the HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Request never produced a response (offline, CORS, rejected promise)
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success status other than the ones mapped below
    #[error("HTTP error: {0}")]
    Http(u16),
    /// 404 from the server
    #[error("Not found")]
    NotFound,
    /// 409 from the upload endpoint: identical content is already stored
    #[error("File already exists (id {existing_id})")]
    Conflict { existing_id: String },
    /// Failed to read the response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Response body did not decode into the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Fetched content could not be handed to the save mechanism
    #[error("Failed to save file: {0}")]
    Save(String),
}

/// Advisory finding about filter input.
///
/// The query is still sent as entered; these are only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("minimum size {min_kb} KB exceeds maximum size {max_kb} KB")]
    InvertedSizeBounds { min_kb: u64, max_kb: u64 },
    #[error("uploaded_after {after} is later than uploaded_before {before}")]
    InvertedDateRange { after: String, before: String },
    #[error("{field}: '{value}' is not a recognized date")]
    InvalidDate { field: &'static str, value: String },
}

/// Duplicate lookup failed; the upload path continues as if the file is new.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate check failed: {0}")]
pub struct DuplicateCheckFailure(#[from] pub TransferError);
