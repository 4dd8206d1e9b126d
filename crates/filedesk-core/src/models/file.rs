use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata and content locator for one uploaded file, as served by `/files/`.
///
/// The remote system owns the record; the client only holds a cached copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Opaque identifier (a UUID on the reference server)
    pub id: String,
    /// Filename as uploaded
    pub original_filename: String,
    /// MIME type reported at upload time
    pub file_type: String,
    /// Size in bytes
    pub size: u64,
    /// Upload instant
    pub uploaded_at: DateTime<Utc>,
    /// URL the content can be fetched from
    #[serde(rename = "file")]
    pub locator: String,
    /// SHA-256 hex digest, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
}

impl FileRecord {
    /// Size in kilobytes, for display.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    /// Top-level MIME category (`"image"` for `"image/png"`).
    pub fn category(&self) -> &str {
        self.file_type
            .split('/')
            .next()
            .unwrap_or(self.file_type.as_str())
    }
}
