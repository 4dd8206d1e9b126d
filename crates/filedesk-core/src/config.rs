//! Client configuration.
//!
//! Centralizes the constants shared by the HTTP backend, the debounce bridge
//! and the filter toolbar.

// =============================================================================
// Network Configuration
// =============================================================================

/// API origin used when `FILEDESK_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Multipart field name the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Filename used when a download is saved without one.
pub const FALLBACK_DOWNLOAD_NAME: &str = "download";

/// Base API origin.
///
/// Read from `FILEDESK_API_URL` at compile time, the way a bundled web
/// client bakes its environment in.
pub fn api_base_url() -> &'static str {
    option_env!("FILEDESK_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Settings for the remote directory backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without trailing slash (e.g. `http://localhost:8000/api`).
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: i32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(api_base_url())
    }
}

/// Distinct listings kept in the query cache before the oldest is evicted.
pub const MAX_CACHED_QUERIES: usize = 16;

// =============================================================================
// Input Configuration
// =============================================================================

/// Quiescence window before typed input is committed to the query.
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// The toolbar collects sizes in kilobytes; the API expects bytes.
pub const BYTES_PER_KB: u64 = 1024;

/// Filter toolbar presets.
pub mod filter_options {
    /// Type filter choices: (wire value, label). Empty value means "all".
    pub const FILE_TYPES: &[(&str, &str)] = &[
        ("", "All Types"),
        ("image", "Images"),
        ("application/pdf", "PDFs"),
        ("text", "Text Files"),
        ("video", "Videos"),
    ];

    /// Size bound choices in kilobytes.
    pub const SIZE_PRESETS_KB: &[(u64, &str)] = &[
        (0, "0 KB"),
        (100, "100 KB"),
        (500, "500 KB"),
        (1024, "1 MB"),
        (2048, "2 MB"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("https://files.example.com/api");
        assert_eq!(config.base_url, "https://files.example.com/api");
        assert_eq!(config.timeout_ms, FETCH_TIMEOUT_MS);
    }

    #[test]
    fn test_api_base_url_has_fallback() {
        assert!(!api_base_url().is_empty());
    }

    #[test]
    fn test_type_presets_start_with_all() {
        assert_eq!(filter_options::FILE_TYPES[0], ("", "All Types"));
    }
}
