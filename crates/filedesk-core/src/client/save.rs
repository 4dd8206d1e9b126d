//! Hand-off of downloaded content to the local environment.

use wasm_bindgen::JsCast;
use web_sys::{Blob, Document, HtmlAnchorElement, HtmlElement, Url};

use crate::error::TransferError;

/// Receives a fully fetched download.
///
/// Only called once the whole body is in memory, so a failed transfer never
/// leaves a partial file behind.
pub trait SaveSink {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), TransferError>;
}

/// Browser save: Blob, object URL, temporary `<a download>` click, revoke.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSave;

impl SaveSink for BrowserSave {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), TransferError> {
        let window = web_sys::window().ok_or(TransferError::NoWindow)?;
        let document = window.document().ok_or(TransferError::NoWindow)?;
        let body = document.body().ok_or(TransferError::NoWindow)?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&parts)
            .map_err(|_| TransferError::Save("could not create blob".to_string()))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| TransferError::Save("could not create object URL".to_string()))?;

        let result = click_download_link(&document, &body, &url, filename);

        let _ = Url::revoke_object_url(&url);
        result
    }
}

fn click_download_link(
    document: &Document,
    body: &HtmlElement,
    url: &str,
    filename: &str,
) -> Result<(), TransferError> {
    let link: HtmlAnchorElement = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| TransferError::Save("could not create link".to_string()))?;
    link.set_href(url);
    link.set_download(filename);
    body.append_child(&link)
        .map_err(|_| TransferError::Save("could not attach link".to_string()))?;
    link.click();
    let _ = body.remove_child(&link);
    Ok(())
}
