//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuCircleAlert as Alert, LuDownload as Download, LuFile as File, LuFileText as FileText,
        LuFilm as FileVideo, LuFolderOpen as Directory, LuImage as FileImage,
        LuRefreshCw as Retry, LuSearch as Search, LuTrash2 as Trash, LuUpload as Upload,
        LuX as Close, LuBookOpen as FilePdf,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Retry, BsDownload as Download, BsExclamationTriangle as Alert,
        BsFileEarmark as File, BsFileEarmarkImage as FileImage, BsFileEarmarkPdf as FilePdf,
        BsFileEarmarkPlay as FileVideo, BsFileEarmarkText as FileText, BsFolder2Open as Directory,
        BsSearch as Search, BsTrash as Trash, BsUpload as Upload, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(DIRECTORY, Directory);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_PDF, FilePdf);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_VIDEO, FileVideo);
themed_icon!(SEARCH, Search);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(TRASH, Trash);
themed_icon!(RETRY, Retry);
themed_icon!(ALERT, Alert);
themed_icon!(CLOSE, Close);
