//! Remote file directory client.
//!
//! [`FileDirectory`] is the public surface (list, search, upload, delete,
//! download, duplicate check). It talks to a [`FileBackend`]:
//! - [`HttpBackend`] - browser Fetch API against the REST endpoints
//! - `MockBackend` - in-memory server stand-in (`mock` feature and tests)

mod backend;
mod digest;
mod directory;
mod endpoints;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod save;

pub use backend::{FileBackend, UploadPayload};
pub use digest::sha256_hex;
pub use directory::{DuplicateCheck, FileDirectory, Removal, UploadOutcome};
pub use endpoints::Endpoints;
pub use http::HttpBackend;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockBackend, MockOp, RecordingSink};
pub use save::{BrowserSave, SaveSink};
