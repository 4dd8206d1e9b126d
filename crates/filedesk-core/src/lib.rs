//! Core logic for the filedesk file-management client.
//!
//! This crate holds everything that can be exercised without a DOM:
//! - [`models`] - [`FileRecord`], [`FilterCriteria`], [`FilterState`], [`SortOrder`]
//! - [`query`] - [`QuerySignature`] construction and advisory validation
//! - [`debounce`] - clock-driven trailing [`Debouncer`]
//! - [`client`] - [`FileDirectory`] over a [`FileBackend`] (HTTP or mock)
//! - [`sync`] - [`ListSync`] view-state synchronizer with its [`QueryCache`]
//! - [`session`] - [`BrowseSession`], the state machine the UI drives

pub mod cache;
pub mod client;
pub mod config;
pub mod console;
pub mod debounce;
pub mod error;
pub mod models;
pub mod query;
pub mod session;
pub mod sync;

pub use cache::QueryCache;
pub use client::{
    DuplicateCheck, FileBackend, FileDirectory, HttpBackend, Removal, SaveSink, UploadOutcome,
};
pub use debounce::{Debouncer, TimerSlot};
pub use error::{DuplicateCheckFailure, TransferError, ValidationError};
pub use models::{FileRecord, FilterCriteria, FilterState, SortOrder};
pub use query::{QuerySignature, validate};
pub use session::BrowseSession;
pub use sync::{FetchTicket, ListSync, ViewState};
