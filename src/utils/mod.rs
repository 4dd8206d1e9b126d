//! Display helpers shared by the UI components.
//!
//! - [`format`] - file size, upload date, and MIME label formatting

pub mod format;
