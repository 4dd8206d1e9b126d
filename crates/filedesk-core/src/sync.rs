//! List view synchronizer.
//!
//! [`ListSync`] owns the view state of the file listing. It does no I/O:
//! whenever a fetch is needed it hands out a [`FetchTicket`], and the caller
//! reports the outcome through [`ListSync::complete`]. Only the ticket of the
//! latest generation is applied, so overlapping fetches resolve
//! last-write-wins no matter which response arrives first.

use crate::cache::QueryCache;
use crate::console;
use crate::error::TransferError;
use crate::models::FileRecord;
use crate::query::QuerySignature;

/// One issued list fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    signature: QuerySignature,
}

impl FetchTicket {
    pub fn signature(&self) -> &QuerySignature {
        &self.signature
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the file list shows. Exactly one state at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Fetch in flight, nothing to show yet
    #[default]
    Loading,
    /// Last fetch failed, nothing to show
    Error(TransferError),
    /// Listing available (possibly empty)
    Ready(Vec<FileRecord>),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn records(&self) -> Option<&[FileRecord]> {
        match self {
            Self::Ready(records) => Some(records),
            _ => None,
        }
    }

    /// Ready with zero records.
    pub fn is_empty(&self) -> bool {
        self.records().is_some_and(<[FileRecord]>::is_empty)
    }
}

/// Binds the current query signature to fetching and caching.
#[derive(Clone, Debug, Default)]
pub struct ListSync {
    signature: Option<QuerySignature>,
    generation: u64,
    in_flight: bool,
    fetches_issued: u64,
    cache: QueryCache,
    view: ViewState,
}

impl ListSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Signature the view currently reflects (or is loading).
    pub fn signature(&self) -> Option<&QuerySignature> {
        self.signature.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Total tickets handed out since creation.
    pub fn fetches_issued(&self) -> u64 {
        self.fetches_issued
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Switch the listing to `signature`.
    ///
    /// Returns a ticket when the signature differs from the current one and
    /// `None` otherwise. A cached result for the new signature is shown
    /// immediately while the ticket revalidates it.
    pub fn set_signature(&mut self, signature: QuerySignature) -> Option<FetchTicket> {
        if self.signature.as_ref() == Some(&signature) {
            return None;
        }
        self.view = match self.cache.get(&signature) {
            Some(records) => ViewState::Ready(records.to_vec()),
            None => ViewState::Loading,
        };
        self.signature = Some(signature.clone());
        Some(self.issue(signature))
    }

    /// Drop every cached listing and refetch the current one.
    ///
    /// Called after a successful upload or delete.
    pub fn invalidate(&mut self) -> Option<FetchTicket> {
        self.cache.invalidate_all();
        self.refetch()
    }

    /// Fetch the current signature again (the error view's retry).
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let signature = self.signature.clone()?;
        if matches!(self.view, ViewState::Error(_)) {
            self.view = ViewState::Loading;
        }
        Some(self.issue(signature))
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` when the ticket was superseded and the outcome dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<FileRecord>, TransferError>,
    ) -> bool {
        if ticket.generation != self.generation {
            console::info(&format!(
                "Discarding stale listing for {} (generation {} < {})",
                ticket.signature, ticket.generation, self.generation
            ));
            return false;
        }

        self.in_flight = false;
        self.view = match result {
            Ok(records) => {
                self.cache.insert(ticket.signature, records.clone());
                ViewState::Ready(records)
            }
            Err(e) => ViewState::Error(e),
        };
        true
    }

    fn issue(&mut self, signature: QuerySignature) -> FetchTicket {
        self.generation += 1;
        self.fetches_issued += 1;
        self.in_flight = true;
        FetchTicket {
            generation: self.generation,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::FilterState;

    fn record(id: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            original_filename: format!("{id}.txt"),
            file_type: "text/plain".to_string(),
            size: 10,
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            locator: format!("http://localhost/media/{id}.txt"),
            file_hash: None,
        }
    }

    fn images() -> QuerySignature {
        let mut state = FilterState::new();
        state.set_file_type("image");
        QuerySignature::from_criteria(state.criteria())
    }

    #[test]
    fn test_starts_loading_without_signature() {
        let mut sync = ListSync::new();
        assert!(sync.view().is_loading());
        assert!(sync.signature().is_none());
        assert!(sync.refetch().is_none());
    }

    #[test]
    fn test_signature_change_issues_one_ticket() {
        let mut sync = ListSync::new();
        let ticket = sync.set_signature(QuerySignature::empty()).unwrap();
        assert!(sync.set_signature(QuerySignature::empty()).is_none());
        assert_eq!(sync.fetches_issued(), 1);
        assert!(sync.is_fetching());

        assert!(sync.complete(ticket, Ok(vec![record("a")])));
        assert_eq!(sync.view().records().map(<[FileRecord]>::len), Some(1));
        assert!(!sync.is_fetching());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut sync = ListSync::new();
        let old = sync.set_signature(QuerySignature::empty()).unwrap();
        let new = sync.set_signature(images()).unwrap();

        assert!(sync.complete(new, Ok(vec![record("img")])));
        assert!(!sync.complete(old, Ok(vec![record("a"), record("b")])));

        assert_eq!(sync.view(), &ViewState::Ready(vec![record("img")]));
        assert_eq!(sync.signature(), Some(&images()));
    }

    #[test]
    fn test_error_state_and_retry() {
        let mut sync = ListSync::new();
        let ticket = sync.set_signature(QuerySignature::empty()).unwrap();
        sync.complete(ticket, Err(TransferError::Http(500)));
        assert_eq!(sync.view(), &ViewState::Error(TransferError::Http(500)));

        let retry = sync.refetch().unwrap();
        assert!(sync.view().is_loading());
        sync.complete(retry, Ok(Vec::new()));
        assert!(sync.view().is_empty());
    }

    #[test]
    fn test_cached_listing_shown_while_revalidating() {
        let mut sync = ListSync::new();
        let t = sync.set_signature(QuerySignature::empty()).unwrap();
        sync.complete(t, Ok(vec![record("a")]));
        let t = sync.set_signature(images()).unwrap();
        sync.complete(t, Ok(vec![record("img")]));

        let back = sync.set_signature(QuerySignature::empty());
        assert!(back.is_some());
        assert_eq!(sync.view(), &ViewState::Ready(vec![record("a")]));
    }

    #[test]
    fn test_invalidate_clears_cache_and_refetches() {
        let mut sync = ListSync::new();
        let t = sync.set_signature(QuerySignature::empty()).unwrap();
        sync.complete(t, Ok(vec![record("a")]));
        assert_eq!(sync.cache().len(), 1);

        let ticket = sync.invalidate().unwrap();
        assert!(sync.cache().is_empty());
        assert_eq!(ticket.signature(), &QuerySignature::empty());
        assert_eq!(sync.fetches_issued(), 2);
    }
}
