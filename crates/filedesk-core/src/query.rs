//! Query signature construction.
//!
//! Maps [`FilterCriteria`] to the parameter set sent to `GET /files/`. The
//! same value is the cache key of the list synchronizer, so two criteria
//! that normalize to the same fields must produce equal signatures.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::BYTES_PER_KB;
use crate::error::ValidationError;
use crate::models::FilterCriteria;

/// Wire parameter names understood by the list endpoint.
pub mod params {
    pub const ORIGINAL_FILENAME: &str = "original_filename";
    pub const FILE_TYPE: &str = "file_type";
    pub const SIZE_SORT: &str = "size_sort";
    pub const UPLOADED_DATE: &str = "uploaded_date";
    pub const UPLOADED_AFTER: &str = "uploaded_after";
    pub const UPLOADED_BEFORE: &str = "uploaded_before";
    pub const MIN_SIZE: &str = "min_size";
    pub const MAX_SIZE: &str = "max_size";
    pub const FILE_HASH: &str = "file_hash";
    /// Free-text parameter of `/files/search/`.
    pub const SEARCH_QUERY: &str = "q";
}

/// Normalized, order-independent request parameters for one listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QuerySignature(BTreeMap<&'static str, String>);

impl QuerySignature {
    /// Signature with no constraints (plain `GET /files/`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the signature for a set of filter values.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut sig = Self::empty();

        sig.insert_text(params::ORIGINAL_FILENAME, &criteria.search);
        sig.insert_text(params::FILE_TYPE, &criteria.file_type);

        if let Some(order) = criteria.size_sort {
            sig.0.insert(params::SIZE_SORT, order.as_str().to_string());
        }
        if let Some(kb) = criteria.min_size_kb {
            sig.0.insert(params::MIN_SIZE, kb_to_bytes(kb).to_string());
        }
        if let Some(kb) = criteria.max_size_kb {
            sig.0.insert(params::MAX_SIZE, kb_to_bytes(kb).to_string());
        }

        if let Some(date) = normalize_date(&criteria.uploaded_date) {
            sig.0.insert(params::UPLOADED_DATE, date.format("%Y-%m-%d").to_string());
        }
        if let Some(bound) = normalize_bound(&criteria.uploaded_after) {
            sig.0.insert(params::UPLOADED_AFTER, bound);
        }
        if let Some(bound) = normalize_bound(&criteria.uploaded_before) {
            sig.0.insert(params::UPLOADED_BEFORE, bound);
        }

        sig
    }

    /// Lookup of stored files by content digest.
    pub fn by_hash(digest: &str) -> Self {
        let mut sig = Self::empty();
        sig.insert_text(params::FILE_HASH, digest);
        sig
    }

    fn insert_text(&mut self, key: &'static str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.0.insert(key, value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parameters in canonical (key) order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Canonical string form; equal signatures yield identical bytes.
    pub fn canonical(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl From<&FilterCriteria> for QuerySignature {
    fn from(criteria: &FilterCriteria) -> Self {
        Self::from_criteria(criteria)
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(all files)");
        }
        let mut first = true;
        for (key, value) in self.pairs() {
            if !first {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Advisory checks on filter input.
///
/// Findings are reported, never enforced: the signature is built from the
/// same input regardless.
pub fn validate(criteria: &FilterCriteria) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if let (Some(min_kb), Some(max_kb)) = (criteria.min_size_kb, criteria.max_size_kb)
        && min_kb > max_kb
    {
        findings.push(ValidationError::InvertedSizeBounds { min_kb, max_kb });
    }

    let dates = [
        (params::UPLOADED_DATE, &criteria.uploaded_date),
        (params::UPLOADED_AFTER, &criteria.uploaded_after),
        (params::UPLOADED_BEFORE, &criteria.uploaded_before),
    ];
    for (field, value) in dates {
        if !value.trim().is_empty() && normalize_date(value).is_none() {
            findings.push(ValidationError::InvalidDate {
                field,
                value: value.clone(),
            });
        }
    }

    if let (Some(after), Some(before)) = (
        parse_instant(&criteria.uploaded_after),
        parse_instant(&criteria.uploaded_before),
    ) && after > before
    {
        findings.push(ValidationError::InvertedDateRange {
            after: criteria.uploaded_after.trim().to_string(),
            before: criteria.uploaded_before.trim().to_string(),
        });
    }

    findings
}

/// Convert a toolbar size in KB to the byte count the API expects.
pub fn kb_to_bytes(kb: u64) -> u64 {
    kb.saturating_mul(BYTES_PER_KB)
}

/// Calendar date of a raw date input, independent of the user's locale.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and RFC 3339 timestamps (the date in
/// the timestamp's own offset).
fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Range bounds keep their time component when one was given.
fn normalize_bound(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(
            dt.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    normalize_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Instant a bound refers to, for range comparison.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    normalize_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterState, SortOrder};

    fn criteria(f: impl FnOnce(&mut FilterState)) -> FilterCriteria {
        let mut state = FilterState::new();
        f(&mut state);
        state.criteria().clone()
    }

    #[test]
    fn test_empty_criteria_yield_empty_signature() {
        let sig = QuerySignature::from_criteria(&FilterCriteria::default());
        assert!(sig.is_empty());
        assert_eq!(sig.canonical(), "{}");
    }

    #[test]
    fn test_blank_text_is_omitted() {
        let sig = QuerySignature::from_criteria(&criteria(|s| {
            s.set_search("   ");
            s.set_file_type("");
        }));
        assert!(sig.is_empty());
    }

    #[test]
    fn test_size_bounds_are_sent_in_bytes() {
        let sig = QuerySignature::from_criteria(&criteria(|s| {
            s.set_min_size_kb(Some(1024));
            s.set_max_size_kb(Some(2048));
        }));
        assert_eq!(sig.get(params::MIN_SIZE), Some("1048576"));
        assert_eq!(sig.get(params::MAX_SIZE), Some("2097152"));
    }

    #[test]
    fn test_zero_bound_is_sent() {
        let sig = QuerySignature::from_criteria(&criteria(|s| s.set_min_size_kb(Some(0))));
        assert_eq!(sig.get(params::MIN_SIZE), Some("0"));
    }

    #[test]
    fn test_huge_bound_saturates() {
        assert_eq!(kb_to_bytes(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_dates_normalize_to_iso() {
        for raw in ["2024-03-05", "2024/03/05", " 2024-03-05 ", "2024-03-05T08:00:00+09:00"] {
            let sig = QuerySignature::from_criteria(&criteria(|s| s.set_uploaded_date(raw)));
            assert_eq!(sig.get(params::UPLOADED_DATE), Some("2024-03-05"), "input {raw:?}");
        }
    }

    #[test]
    fn test_unparseable_date_is_omitted() {
        let sig = QuerySignature::from_criteria(&criteria(|s| s.set_uploaded_date("yesterday")));
        assert!(sig.get(params::UPLOADED_DATE).is_none());
    }

    #[test]
    fn test_range_bounds() {
        let sig = QuerySignature::from_criteria(&criteria(|s| {
            s.set_uploaded_after("2024-01-01");
            s.set_uploaded_before("2024-02-01T12:30:00+01:00");
        }));
        assert_eq!(sig.get(params::UPLOADED_AFTER), Some("2024-01-01"));
        assert_eq!(sig.get(params::UPLOADED_BEFORE), Some("2024-02-01T11:30:00Z"));
    }

    #[test]
    fn test_sort_is_sent() {
        let sig = QuerySignature::from_criteria(&criteria(|s| {
            s.set_size_sort(Some(SortOrder::Desc));
        }));
        assert_eq!(sig.get(params::SIZE_SORT), Some("desc"));
    }

    #[test]
    fn test_signature_is_order_independent() {
        let a = QuerySignature::from_criteria(&criteria(|s| {
            s.set_file_type("image");
            s.set_search("cat");
            s.set_max_size_kb(Some(500));
        }));
        let b = QuerySignature::from_criteria(&criteria(|s| {
            s.set_max_size_kb(Some(500));
            s.set_search("cat ");
            s.set_file_type("image");
        }));
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_equivalent_dates_share_a_signature() {
        let a = QuerySignature::from_criteria(&criteria(|s| s.set_uploaded_date("2024-03-05")));
        let b = QuerySignature::from_criteria(&criteria(|s| s.set_uploaded_date("2024/03/05")));
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_fields() {
        let base = criteria(|s| s.set_file_type("image"));
        let changed = criteria(|s| {
            s.set_file_type("image");
            s.set_size_sort(Some(SortOrder::Asc));
        });
        assert_ne!(
            QuerySignature::from_criteria(&base),
            QuerySignature::from_criteria(&changed)
        );
    }

    #[test]
    fn test_pairs_are_sorted_by_key() {
        let sig = QuerySignature::from_criteria(&criteria(|s| {
            s.set_size_sort(Some(SortOrder::Asc));
            s.set_file_type("text");
            s.set_min_size_kb(Some(1));
        }));
        let keys: Vec<_> = sig.pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["file_type", "min_size", "size_sort"]);
        assert_eq!(sig.to_string(), "file_type=text&min_size=1024&size_sort=asc");
    }

    #[test]
    fn test_by_hash() {
        let sig = QuerySignature::by_hash("abc123");
        assert_eq!(sig.len(), 1);
        assert_eq!(sig.get(params::FILE_HASH), Some("abc123"));
    }

    #[test]
    fn test_validate_reports_but_does_not_block() {
        let input = criteria(|s| {
            s.set_min_size_kb(Some(2048));
            s.set_max_size_kb(Some(100));
            s.set_uploaded_date("not a date");
        });
        let findings = validate(&input);
        assert!(findings.contains(&ValidationError::InvertedSizeBounds {
            min_kb: 2048,
            max_kb: 100
        }));
        assert!(findings.iter().any(|f| matches!(
            f,
            ValidationError::InvalidDate { field: "uploaded_date", .. }
        )));

        let sig = QuerySignature::from_criteria(&input);
        assert_eq!(sig.get(params::MIN_SIZE), Some("2097152"));
        assert_eq!(sig.get(params::MAX_SIZE), Some("102400"));
    }

    #[test]
    fn test_validate_inverted_date_range() {
        let input = criteria(|s| {
            s.set_uploaded_after("2024-05-01");
            s.set_uploaded_before("2024-04-01");
        });
        assert_eq!(
            validate(&input),
            vec![ValidationError::InvertedDateRange {
                after: "2024-05-01".to_string(),
                before: "2024-04-01".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_clean_input() {
        let input = criteria(|s| {
            s.set_min_size_kb(Some(100));
            s.set_max_size_kb(Some(100));
            s.set_uploaded_date("2024-01-01");
        });
        assert!(validate(&input).is_empty());
    }
}
