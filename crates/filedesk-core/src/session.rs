//! Browsing session: filters, debounce, and list synchronization together.
//!
//! The UI calls [`BrowseSession::edit`] on every input change and
//! [`BrowseSession::tick`] when its timer fires. Tickets that come out of
//! the session are executed against a
//! [`FileDirectory`](crate::client::FileDirectory) and fed back through
//! [`BrowseSession::complete`].

use crate::config::SEARCH_DEBOUNCE_MS;
use crate::console;
use crate::debounce::Debouncer;
use crate::error::TransferError;
use crate::models::{FileRecord, FilterState};
use crate::query::{QuerySignature, validate};
use crate::sync::{FetchTicket, ListSync, ViewState};

#[derive(Clone, Debug)]
pub struct BrowseSession {
    filters: FilterState,
    debouncer: Debouncer<QuerySignature>,
    sync: ListSync,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::with_window(u64::from(SEARCH_DEBOUNCE_MS))
    }

    pub fn with_window(window_ms: u64) -> Self {
        Self {
            filters: FilterState::new(),
            debouncer: Debouncer::new(window_ms),
            sync: ListSync::new(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &ViewState {
        self.sync.view()
    }

    /// Signature the list currently reflects.
    pub fn committed_signature(&self) -> Option<&QuerySignature> {
        self.sync.signature()
    }

    pub fn fetches_issued(&self) -> u64 {
        self.sync.fetches_issued()
    }

    pub fn is_commit_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Milliseconds until the pending edit commits.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.debouncer.remaining(now)
    }

    /// Initial listing for the current filters, without waiting.
    pub fn start(&mut self) -> Option<FetchTicket> {
        let signature = QuerySignature::from_criteria(self.filters.criteria());
        self.sync.set_signature(signature)
    }

    /// Change one or more filter dimensions and restart the quiet window.
    pub fn edit(&mut self, now: u64, f: impl FnOnce(&mut FilterState)) {
        f(&mut self.filters);
        for finding in validate(self.filters.criteria()) {
            console::warn(&finding.to_string());
        }
        let signature = QuerySignature::from_criteria(self.filters.criteria());
        self.debouncer.push(signature, now);
    }

    /// Commit the pending edit if the input has been quiet long enough.
    pub fn tick(&mut self, now: u64) -> Option<FetchTicket> {
        let signature = self.debouncer.poll(now)?;
        self.sync.set_signature(signature)
    }

    /// Commit the pending edit without waiting out the window.
    pub fn commit_now(&mut self) -> Option<FetchTicket> {
        let signature = self.debouncer.flush()?;
        self.sync.set_signature(signature)
    }

    /// Reset every filter and list all files right away.
    pub fn clear(&mut self) -> Option<FetchTicket> {
        self.filters.clear();
        self.debouncer.cancel();
        self.sync.set_signature(QuerySignature::empty())
    }

    /// Drop an uncommitted edit, e.g. when the view is torn down.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was superseded.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<FileRecord>, TransferError>,
    ) -> bool {
        self.sync.complete(ticket, result)
    }

    /// Refresh after an upload or delete.
    pub fn invalidate(&mut self) -> Option<FetchTicket> {
        self.sync.invalidate()
    }

    /// Fetch the current listing again after an error.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        self.sync.refetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FileDirectory, MockBackend, MockOp};
    use crate::models::SortOrder;
    use crate::query::params;

    /// Start a session and settle its initial fetch.
    async fn started(dir: &FileDirectory<MockBackend>) -> BrowseSession {
        let mut session = BrowseSession::new();
        let ticket = session.start().unwrap();
        let result = dir.list_signature(ticket.signature()).await;
        session.complete(ticket, result);
        session
    }

    async fn run(dir: &FileDirectory<MockBackend>, session: &mut BrowseSession, ticket: FetchTicket) {
        let result = dir.list_signature(ticket.signature()).await;
        session.complete(ticket, result);
    }

    #[test]
    fn test_keystroke_burst_issues_one_fetch() {
        let mut session = BrowseSession::new();
        session.start();
        let before = session.fetches_issued();

        session.edit(0, |f| f.set_search("r"));
        session.edit(100, |f| f.set_search("re"));
        session.edit(200, |f| f.set_search("rep"));

        let mut tickets = Vec::new();
        for now in 0..=2000 {
            if let Some(ticket) = session.tick(now) {
                tickets.push((now, ticket));
            }
        }

        assert_eq!(tickets.len(), 1);
        let (at, ticket) = &tickets[0];
        assert_eq!(*at, 700);
        assert_eq!(ticket.signature().get(params::ORIGINAL_FILENAME), Some("rep"));
        assert_eq!(session.fetches_issued(), before + 1);
    }

    #[test]
    fn test_sort_flip_within_window_fetches_final_value() {
        let mut session = BrowseSession::new();
        session.start();

        session.edit(0, |f| {
            f.set_file_type("image");
            f.set_size_sort(Some(SortOrder::Desc));
        });
        session.edit(150, |f| f.set_size_sort(Some(SortOrder::Asc)));

        assert!(session.tick(500).is_none());
        let ticket = session.tick(650).unwrap();
        assert_eq!(ticket.signature().get(params::FILE_TYPE), Some("image"));
        assert_eq!(ticket.signature().get(params::SIZE_SORT), Some("asc"));
        assert!(session.tick(5000).is_none());
    }

    #[test]
    fn test_edit_back_to_committed_value_fetches_nothing() {
        let mut session = BrowseSession::new();
        session.start();
        let before = session.fetches_issued();

        session.edit(0, |f| f.set_search("x"));
        session.edit(100, |f| f.set_search(""));

        assert!(session.tick(600).is_none());
        assert_eq!(session.fetches_issued(), before);
    }

    #[test]
    fn test_clear_is_immediate() {
        let mut session = BrowseSession::new();
        session.start();
        session.edit(0, |f| f.set_search("report"));
        session.tick(500).unwrap();

        session.edit(1000, |f| f.set_file_type("pdf"));
        let ticket = session.clear().unwrap();

        assert!(ticket.signature().is_empty());
        assert!(session.filters().is_clear());
        assert!(!session.is_commit_pending());
        assert!(session.tick(10_000).is_none());
    }

    #[test]
    fn test_commit_now_skips_the_window() {
        let mut session = BrowseSession::new();
        session.start();
        session.edit(0, |f| f.set_search("invoice"));

        let ticket = session.commit_now().unwrap();
        assert_eq!(ticket.signature().get(params::ORIGINAL_FILENAME), Some("invoice"));
        assert!(!session.is_commit_pending());
        assert!(session.tick(500).is_none());
        assert!(session.commit_now().is_none());
    }

    #[test]
    fn test_cancel_pending_drops_edit() {
        let mut session = BrowseSession::new();
        session.start();
        session.edit(0, |f| f.set_search("abandoned"));
        assert_eq!(session.remaining(200), Some(300));

        session.cancel_pending();
        assert!(session.tick(1000).is_none());
    }

    #[tokio::test]
    async fn test_size_bound_reaches_backend_in_bytes() {
        let dir = FileDirectory::new(MockBackend::new());
        let mut session = started(&dir).await;

        session.edit(0, |f| f.set_min_size_kb(Some(1024)));
        let ticket = session.tick(500).unwrap();
        run(&dir, &mut session, ticket).await;

        let sent = dir.backend().last_list_query().unwrap();
        assert_eq!(sent.get(params::MIN_SIZE), Some("1048576"));
    }

    #[tokio::test]
    async fn test_deleted_file_is_gone_after_refresh() {
        let dir = FileDirectory::new(MockBackend::new());
        let keep = dir.upload(b"keep", "keep.txt").await.unwrap();
        let drop = dir.upload(b"drop", "drop.txt").await.unwrap();
        let mut session = started(&dir).await;
        assert_eq!(session.view().records().map(<[FileRecord]>::len), Some(2));

        dir.delete(&drop.id).await.unwrap();
        let ticket = session.invalidate().unwrap();
        run(&dir, &mut session, ticket).await;

        assert_eq!(session.view(), &ViewState::Ready(vec![keep]));
    }

    #[tokio::test]
    async fn test_error_then_retry() {
        let dir = FileDirectory::new(MockBackend::new());
        dir.backend().fail_next(MockOp::List, TransferError::Http(502));
        let mut session = started(&dir).await;
        assert_eq!(session.view(), &ViewState::Error(TransferError::Http(502)));

        let ticket = session.retry().unwrap();
        assert!(session.view().is_loading());
        run(&dir, &mut session, ticket).await;
        assert!(session.view().is_empty());
    }

    #[tokio::test]
    async fn test_slow_response_never_overwrites_newer() {
        let dir = FileDirectory::new(MockBackend::new());
        dir.upload(b"a", "report.txt").await.unwrap();
        dir.upload(b"b", "photo.png").await.unwrap();
        let mut session = started(&dir).await;

        session.edit(0, |f| f.set_search("report"));
        let first = session.tick(500).unwrap();
        session.edit(600, |f| f.set_search("photo"));
        let second = session.tick(1100).unwrap();

        let second_result = dir.list_signature(second.signature()).await;
        let first_result = dir.list_signature(first.signature()).await;
        assert!(session.complete(second, second_result));
        assert!(!session.complete(first, first_result));

        let names: Vec<_> = session
            .view()
            .records()
            .unwrap()
            .iter()
            .map(|r| r.original_filename.as_str())
            .collect();
        assert_eq!(names, vec!["photo.png"]);
    }
}
