//! Transport seam between [`FileDirectory`](super::FileDirectory) and the
//! remote API.

use crate::error::TransferError;
use crate::models::FileRecord;
use crate::query::QuerySignature;

/// One file to send to `POST /files/`.
#[derive(Clone, Copy, Debug)]
pub struct UploadPayload<'a> {
    pub bytes: &'a [u8],
    pub filename: &'a str,
    pub content_type: &'a str,
}

/// Raw remote operations.
///
/// Futures are not `Send`: everything runs on the browser's single-threaded
/// event loop.
#[allow(async_fn_in_trait)]
pub trait FileBackend {
    /// `GET /files/` with the signature's parameters.
    async fn list(&self, query: &QuerySignature) -> Result<Vec<FileRecord>, TransferError>;

    /// `GET /files/search/?q=`.
    async fn search(&self, query: &str) -> Result<Vec<FileRecord>, TransferError>;

    /// `POST /files/` as multipart.
    async fn upload(&self, payload: UploadPayload<'_>) -> Result<FileRecord, TransferError>;

    /// `DELETE /files/{id}/`.
    async fn delete(&self, id: &str) -> Result<(), TransferError>;

    /// Fetch the complete body behind a content locator.
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, TransferError>;
}
