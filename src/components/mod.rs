//! UI components built with Leptos.
//!
//! - [`files`] - File manager page (toolbar, upload, list)
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod files;
pub mod icons;

pub use files::FileManager;
