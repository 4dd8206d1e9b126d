//! Application configuration.
//!
//! UI-level constants. Client settings (API base URL, timeouts, debounce
//! window, filter presets) live in `filedesk_core::config`.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the header.
pub const APP_NAME: &str = "filedesk";

// =============================================================================
// Notices
// =============================================================================

/// How long an upload/delete notice stays visible, in milliseconds.
pub const NOTICE_DURATION_MS: u32 = 4000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
