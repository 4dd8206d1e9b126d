//! Data models shared by the client, the synchronizer and the UI.
//!
//! - [`FileRecord`] - server-held metadata for one uploaded file
//! - [`FilterCriteria`], [`FilterState`], [`SortOrder`] - user filter input

mod file;
mod filter;

pub use file::FileRecord;
pub use filter::{FilterCriteria, FilterState, SortOrder};
