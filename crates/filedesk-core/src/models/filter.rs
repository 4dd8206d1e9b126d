//! User-entered filter input.
//!
//! [`FilterState`] is a plain container: every setter replaces one
//! dimension, nothing is validated here. Normalization happens when a
//! [`QuerySignature`](crate::query::QuerySignature) is built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction over file size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire value for the `size_sort` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a toolbar/select value. Anything else means "no sort".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw filter values as the user entered them.
///
/// Empty strings and `None` mean "no constraint". Sizes are in kilobytes,
/// dates are whatever the input control produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Filename substring
    pub search: String,
    /// Type category or full MIME type
    pub file_type: String,
    /// Lower size bound in KB
    pub min_size_kb: Option<u64>,
    /// Upper size bound in KB
    pub max_size_kb: Option<u64>,
    /// Exact upload date
    pub uploaded_date: String,
    /// Inclusive lower upload bound
    pub uploaded_after: String,
    /// Inclusive upper upload bound
    pub uploaded_before: String,
    /// Size ordering
    pub size_sort: Option<SortOrder>,
}

impl FilterCriteria {
    /// True when no dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Latest value of each filter dimension for the current view session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current values.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.criteria.search = value.into();
    }

    pub fn set_file_type(&mut self, value: impl Into<String>) {
        self.criteria.file_type = value.into();
    }

    pub fn set_min_size_kb(&mut self, value: Option<u64>) {
        self.criteria.min_size_kb = value;
    }

    pub fn set_max_size_kb(&mut self, value: Option<u64>) {
        self.criteria.max_size_kb = value;
    }

    pub fn set_uploaded_date(&mut self, value: impl Into<String>) {
        self.criteria.uploaded_date = value.into();
    }

    pub fn set_uploaded_after(&mut self, value: impl Into<String>) {
        self.criteria.uploaded_after = value.into();
    }

    pub fn set_uploaded_before(&mut self, value: impl Into<String>) {
        self.criteria.uploaded_before = value.into();
    }

    pub fn set_size_sort(&mut self, value: Option<SortOrder>) {
        self.criteria.size_sort = value;
    }

    /// Reset every dimension at once.
    pub fn clear(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn is_clear(&self) -> bool {
        self.criteria.is_unconstrained()
    }
}
