//! REST endpoint paths.

/// URL builder for the `/files/` resource under one API origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection URL (list and upload).
    pub fn files(&self) -> String {
        format!("{}/files/", self.base_url)
    }

    /// Single record URL (delete).
    pub fn file(&self, id: &str) -> String {
        format!("{}/files/{}/", self.base_url, id.trim_matches('/'))
    }

    /// Free-text search URL.
    pub fn search(&self) -> String {
        format!("{}/files/search/", self.base_url)
    }
}
