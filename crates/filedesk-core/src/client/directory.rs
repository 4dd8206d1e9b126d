//! Public operations of the remote file directory.

use crate::config::FALLBACK_DOWNLOAD_NAME;
use crate::console;
use crate::error::{DuplicateCheckFailure, TransferError};
use crate::models::{FileRecord, FilterCriteria};
use crate::query::QuerySignature;

use super::backend::{FileBackend, UploadPayload};
use super::digest::sha256_hex;
use super::save::SaveSink;

/// Outcome of a delete. Both variants mean the record is no longer present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The server removed the record
    Deleted,
    /// The server had no such record (already deleted elsewhere)
    AlreadyGone,
}

/// Result of a content-digest lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub existing: Option<FileRecord>,
}

impl DuplicateCheck {
    fn not_duplicate() -> Self {
        Self::default()
    }
}

/// Result of [`FileDirectory::upload_unique`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(FileRecord),
    /// Identical content already stored; nothing was uploaded
    Duplicate(FileRecord),
}

/// Client for the remote `/files/` directory.
#[derive(Clone, Debug)]
pub struct FileDirectory<B> {
    backend: B,
}

impl<B: FileBackend> FileDirectory<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Filtered, sorted listing. Results come back in server order.
    pub async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<FileRecord>, TransferError> {
        self.list_signature(&QuerySignature::from_criteria(criteria))
            .await
    }

    /// Listing for an already-built signature.
    pub async fn list_signature(
        &self,
        signature: &QuerySignature,
    ) -> Result<Vec<FileRecord>, TransferError> {
        self.backend.list(signature).await
    }

    /// Free-text search through the dedicated search endpoint.
    pub async fn search(&self, query: &str) -> Result<Vec<FileRecord>, TransferError> {
        self.backend.search(query.trim()).await
    }

    /// Upload one file. The multipart part type is guessed from the name.
    pub async fn upload(&self, bytes: &[u8], filename: &str) -> Result<FileRecord, TransferError> {
        let content_type = mime_guess::from_path(filename).first_or_octet_stream();
        self.backend
            .upload(UploadPayload {
                bytes,
                filename,
                content_type: content_type.essence_str(),
            })
            .await
    }

    /// Duplicate check, then upload unless the content is already stored.
    ///
    /// A failed check does not stop the upload.
    pub async fn upload_unique(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<UploadOutcome, TransferError> {
        let check = self.duplicate_check(bytes).await;
        if check.is_duplicate
            && let Some(existing) = check.existing
        {
            return Ok(UploadOutcome::Duplicate(existing));
        }
        self.upload(bytes, filename).await.map(UploadOutcome::Uploaded)
    }

    /// Delete a record. A 404 is reported as [`Removal::AlreadyGone`].
    pub async fn delete(&self, id: &str) -> Result<Removal, TransferError> {
        match self.backend.delete(id).await {
            Ok(()) => Ok(Removal::Deleted),
            Err(TransferError::NotFound) => Ok(Removal::AlreadyGone),
            Err(e) => Err(e),
        }
    }

    /// Fetch a file's content and hand it to `sink`.
    ///
    /// The sink only sees a complete body; fetch failures never reach it.
    pub async fn download<S: SaveSink>(
        &self,
        locator: &str,
        filename: &str,
        sink: &S,
    ) -> Result<(), TransferError> {
        let bytes = self.backend.fetch(locator).await?;
        let filename = match filename.trim() {
            "" => FALLBACK_DOWNLOAD_NAME,
            name => name,
        };
        sink.save(&bytes, filename)
    }

    /// Look the content up by digest, failing open.
    ///
    /// Any failure is logged and reported as "not a duplicate".
    pub async fn duplicate_check(&self, bytes: &[u8]) -> DuplicateCheck {
        match self.try_duplicate_check(bytes).await {
            Ok(check) => check,
            Err(failure) => {
                console::warn(&failure.to_string());
                DuplicateCheck::not_duplicate()
            }
        }
    }

    /// Digest lookup that surfaces its failure.
    ///
    /// Only a record carrying the same digest counts as a duplicate. Servers
    /// that ignore the `file_hash` filter return unrelated files, and records
    /// without a digest prove nothing; the server's 409 on upload still
    /// catches those.
    pub async fn try_duplicate_check(
        &self,
        bytes: &[u8],
    ) -> Result<DuplicateCheck, DuplicateCheckFailure> {
        let digest = sha256_hex(bytes);
        let matches = self.backend.list(&QuerySignature::by_hash(&digest)).await?;
        let existing = matches
            .into_iter()
            .find(|record| record.file_hash.as_deref() == Some(digest.as_str()));
        Ok(DuplicateCheck {
            is_duplicate: existing.is_some(),
            existing,
        })
    }
}
