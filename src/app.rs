//! Root application module.
//!
//! Contains the main App component and the AppContext definition.

use filedesk_core::config::{ClientConfig, api_base_url};
use filedesk_core::{BrowseSession, FileDirectory, HttpBackend};
use leptos::prelude::*;

use crate::components::FileManager;

// ============================================================================
// Notice
// ============================================================================

/// Transient message shown above the file list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read with
/// `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because every field is an arena handle.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Filters, pending debounce, and list view state.
    pub session: RwSignal<BrowseSession>,

    /// Remote file directory client.
    pub directory: StoredValue<FileDirectory<HttpBackend>>,

    /// Latest upload/delete/download notice.
    pub notice: RwSignal<Option<Notice>>,
}

impl AppContext {
    pub fn new() -> Self {
        let config = ClientConfig::new(api_base_url());
        Self {
            session: RwSignal::new(BrowseSession::new()),
            directory: StoredValue::new(FileDirectory::new(HttpBackend::new(&config))),
            notice: RwSignal::new(None),
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notice.set(Some(notice));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f7f8fa;
                    color: #1f2933;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #c0392b; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #52606d; margin-bottom: 2rem;">
                            "The file manager hit an unexpected error. Reload to try again."
                        </p>
                        <ul style="text-align: left; color: #c0392b; font-size: 0.9rem;">
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #2f6fde;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <FileManager />
        </ErrorBoundary>
    }
}
