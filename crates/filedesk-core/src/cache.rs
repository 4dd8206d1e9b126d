//! In-memory listing cache.
//!
//! Results are keyed by the [`QuerySignature`] that produced them, so equal
//! filter sets share one entry. Invalidation is coarse: any mutation of the
//! remote directory drops every entry. The cache holds at most `capacity`
//! listings and evicts the least recently stored one.

use std::collections::{HashMap, VecDeque};

use crate::config::MAX_CACHED_QUERIES;
use crate::models::FileRecord;
use crate::query::QuerySignature;

#[derive(Clone, Debug)]
pub struct QueryCache {
    entries: HashMap<QuerySignature, Vec<FileRecord>>,
    /// Signatures from least to most recently stored
    order: VecDeque<QuerySignature>,
    capacity: usize,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(MAX_CACHED_QUERIES)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, signature: &QuerySignature) -> Option<&[FileRecord]> {
        self.entries.get(signature).map(Vec::as_slice)
    }

    /// Store a listing, evicting the oldest entry when full.
    pub fn insert(&mut self, signature: QuerySignature, records: Vec<FileRecord>) {
        if self.entries.contains_key(&signature) {
            self.order.retain(|s| s != &signature);
        } else if self.entries.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(signature.clone());
        self.entries.insert(signature, records);
    }

    /// Drop every cached listing.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
