//! In-memory stand-in for the remote directory.
//!
//! Applies the server's filter semantics (case-insensitive substring match on
//! name and type, byte bounds, date filters, size ordering, newest first by
//! default), records every list query, and can fail the next call of a given
//! operation.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::error::TransferError;
use crate::models::FileRecord;
use crate::query::{QuerySignature, params};

use super::backend::{FileBackend, UploadPayload};
use super::digest::sha256_hex;
use super::save::SaveSink;

/// Backend operation, for failure injection and call counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockOp {
    List,
    Search,
    Upload,
    Delete,
    Fetch,
}

#[derive(Debug)]
struct StoredFile {
    record: FileRecord,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    files: Vec<StoredFile>,
    next_id: u64,
    failures: Vec<(MockOp, TransferError)>,
    list_queries: Vec<QuerySignature>,
    calls: Vec<MockOp>,
}

/// Shared handle; clones see the same store.
#[derive(Clone, Debug, Default)]
pub struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file directly, bypassing failure injection and call logs.
    pub fn seed(&self, filename: &str, bytes: &[u8]) -> FileRecord {
        let content_type = mime_guess::from_path(filename).first_or_octet_stream();
        let mut state = self.state.borrow_mut();
        state.store(filename, bytes, content_type.essence_str())
    }

    /// Make the next call of `op` fail with `error`.
    pub fn fail_next(&self, op: MockOp, error: TransferError) {
        self.state.borrow_mut().failures.push((op, error));
    }

    /// Every signature passed to `list`, oldest first.
    pub fn list_queries(&self) -> Vec<QuerySignature> {
        self.state.borrow().list_queries.clone()
    }

    pub fn last_list_query(&self) -> Option<QuerySignature> {
        self.state.borrow().list_queries.last().cloned()
    }

    /// Number of calls made for `op`.
    pub fn calls(&self, op: MockOp) -> usize {
        self.state.borrow().calls.iter().filter(|c| **c == op).count()
    }

    /// Stored records, newest first.
    pub fn records(&self) -> Vec<FileRecord> {
        self.state
            .borrow()
            .files
            .iter()
            .map(|f| f.record.clone())
            .collect()
    }

    fn begin(&self, op: MockOp) -> Result<(), TransferError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(op);
        match state.failures.iter().position(|(o, _)| *o == op) {
            Some(index) => Err(state.failures.remove(index).1),
            None => Ok(()),
        }
    }
}

impl MockState {
    fn store(&mut self, filename: &str, bytes: &[u8], content_type: &str) -> FileRecord {
        self.next_id += 1;
        let id = format!("00000000-0000-4000-8000-{:012x}", self.next_id);
        let uploaded_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default()
            + Duration::minutes(self.next_id as i64);
        let record = FileRecord {
            locator: format!("mock://media/uploads/{id}"),
            id,
            original_filename: filename.to_string(),
            file_type: content_type.to_string(),
            size: bytes.len() as u64,
            uploaded_at,
            file_hash: Some(sha256_hex(bytes)),
        };
        self.files.insert(
            0,
            StoredFile {
                record: record.clone(),
                bytes: bytes.to_vec(),
            },
        );
        record
    }
}

impl FileBackend for MockBackend {
    async fn list(&self, query: &QuerySignature) -> Result<Vec<FileRecord>, TransferError> {
        self.state.borrow_mut().list_queries.push(query.clone());
        self.begin(MockOp::List)?;

        let state = self.state.borrow();
        let mut records: Vec<FileRecord> = state
            .files
            .iter()
            .map(|f| &f.record)
            .filter(|r| matches_query(r, query))
            .cloned()
            .collect();

        match query.get(params::SIZE_SORT) {
            Some(v) if v.eq_ignore_ascii_case("asc") => records.sort_by_key(|r| r.size),
            Some(v) if v.eq_ignore_ascii_case("desc") => {
                records.sort_by_key(|r| std::cmp::Reverse(r.size))
            }
            _ => {}
        }
        Ok(records)
    }

    async fn search(&self, query: &str) -> Result<Vec<FileRecord>, TransferError> {
        self.begin(MockOp::Search)?;
        let needle = query.to_lowercase();
        Ok(self
            .state
            .borrow()
            .files
            .iter()
            .filter(|f| f.record.original_filename.to_lowercase().contains(&needle))
            .map(|f| f.record.clone())
            .collect())
    }

    async fn upload(&self, payload: UploadPayload<'_>) -> Result<FileRecord, TransferError> {
        self.begin(MockOp::Upload)?;
        let digest = sha256_hex(payload.bytes);
        let mut state = self.state.borrow_mut();
        if let Some(existing) = state
            .files
            .iter()
            .find(|f| f.record.file_hash.as_deref() == Some(digest.as_str()))
        {
            return Err(TransferError::Conflict {
                existing_id: existing.record.id.clone(),
            });
        }
        Ok(state.store(payload.filename, payload.bytes, payload.content_type))
    }

    async fn delete(&self, id: &str) -> Result<(), TransferError> {
        self.begin(MockOp::Delete)?;
        let mut state = self.state.borrow_mut();
        let index = state
            .files
            .iter()
            .position(|f| f.record.id == id)
            .ok_or(TransferError::NotFound)?;
        state.files.remove(index);
        Ok(())
    }

    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, TransferError> {
        self.begin(MockOp::Fetch)?;
        self.state
            .borrow()
            .files
            .iter()
            .find(|f| f.record.locator == locator)
            .map(|f| f.bytes.clone())
            .ok_or(TransferError::NotFound)
    }
}

fn matches_query(record: &FileRecord, query: &QuerySignature) -> bool {
    let contains = |haystack: &str, key: &str| {
        query
            .get(key)
            .is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
    };
    let bound = |key: &str, check: fn(u64, u64) -> bool| {
        query
            .get(key)
            .and_then(|v| v.parse::<u64>().ok())
            .is_none_or(|limit| check(record.size, limit))
    };

    contains(&record.original_filename, params::ORIGINAL_FILENAME)
        && contains(&record.file_type, params::FILE_TYPE)
        && bound(params::MIN_SIZE, |size, min| size >= min)
        && bound(params::MAX_SIZE, |size, max| size <= max)
        && query
            .get(params::FILE_HASH)
            .is_none_or(|h| record.file_hash.as_deref() == Some(h))
        && query
            .get(params::UPLOADED_DATE)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .is_none_or(|d| record.uploaded_at.date_naive() == d)
        && query
            .get(params::UPLOADED_AFTER)
            .and_then(parse_bound)
            .is_none_or(|after| record.uploaded_at >= after)
        && query
            .get(params::UPLOADED_BEFORE)
            .and_then(parse_bound)
            .is_none_or(|before| record.uploaded_at <= before)
}

fn parse_bound(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Sink that keeps saved downloads in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    saved: RefCell<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.borrow().clone()
    }
}

impl SaveSink for RecordingSink {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), TransferError> {
        self.saved
            .borrow_mut()
            .push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}
