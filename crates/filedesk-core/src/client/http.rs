//! Browser Fetch API backend.
//!
//! Every request is raced against a timeout, and non-success statuses are
//! mapped to [`TransferError`] before any body is read.

use js_sys::{Array, Promise, Uint8Array};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response, Url};

use crate::config::{ClientConfig, UPLOAD_FIELD};
use crate::error::TransferError;
use crate::models::FileRecord;
use crate::query::{QuerySignature, params};

use super::backend::{FileBackend, UploadPayload};
use super::endpoints::Endpoints;

// =============================================================================
// Promise Racing
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined, which a fetch never does
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);

    match JsFuture::from(Promise::race(&race_array)).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Body of a 409 from the upload endpoint.
#[derive(Deserialize)]
struct ConflictBody {
    existing_file_id: Option<String>,
}

/// [`FileBackend`] over the browser Fetch API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpBackend {
    endpoints: Endpoints,
    timeout_ms: i32,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: Endpoints::new(&config.base_url),
            timeout_ms: config.timeout_ms,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a request and return the response if its status is a success.
    async fn send(&self, request: Request) -> Result<Response, TransferError> {
        let window = web_sys::window().ok_or(TransferError::NoWindow)?;
        let fetch_promise = window.fetch_with_request(&request);

        let resp: Response = match race_with_timeout(fetch_promise, self.timeout_ms).await {
            RaceResult::TimedOut => return Err(TransferError::Timeout),
            RaceResult::Error(msg) => return Err(TransferError::Network(msg)),
            RaceResult::Completed(result) => result
                .dyn_into()
                .map_err(|_| TransferError::Decode("not a Response".to_string()))?,
        };

        match resp.status() {
            _ if resp.ok() => Ok(resp),
            404 => Err(TransferError::NotFound),
            409 => {
                let body = read_text(&resp).await.unwrap_or_default();
                let existing_id = serde_json::from_str::<ConflictBody>(&body)
                    .ok()
                    .and_then(|b| b.existing_file_id)
                    .unwrap_or_default();
                Err(TransferError::Conflict { existing_id })
            }
            status => Err(TransferError::Http(status)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransferError> {
        let resp = self.send(build_request("GET", url, None)?).await?;
        let text = read_text(&resp).await?;
        serde_json::from_str(&text).map_err(|e| TransferError::Decode(e.to_string()))
    }
}

impl FileBackend for HttpBackend {
    async fn list(&self, query: &QuerySignature) -> Result<Vec<FileRecord>, TransferError> {
        let url = with_query(&self.endpoints.files(), query.pairs())?;
        self.get_json(&url).await
    }

    async fn search(&self, query: &str) -> Result<Vec<FileRecord>, TransferError> {
        let url = with_query(
            &self.endpoints.search(),
            std::iter::once((params::SEARCH_QUERY, query)),
        )?;
        self.get_json(&url).await
    }

    async fn upload(&self, payload: UploadPayload<'_>) -> Result<FileRecord, TransferError> {
        let form = multipart_body(payload)?;
        let request = build_request("POST", &self.endpoints.files(), Some(&form))?;
        let resp = self.send(request).await?;
        let text = read_text(&resp).await?;
        serde_json::from_str(&text).map_err(|e| TransferError::Decode(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), TransferError> {
        let request = build_request("DELETE", &self.endpoints.file(id), None)?;
        self.send(request).await.map(|_| ())
    }

    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, TransferError> {
        let resp = self.send(build_request("GET", locator, None)?).await?;
        let buffer = JsFuture::from(
            resp.array_buffer()
                .map_err(|_| TransferError::ResponseReadFailed)?,
        )
        .await
        .map_err(|_| TransferError::ResponseReadFailed)?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

fn build_request(method: &str, url: &str, body: Option<&JsValue>) -> Result<Request, TransferError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(body);
    }
    Request::new_with_str_and_init(url, &opts).map_err(|_| TransferError::RequestCreationFailed)
}

/// Append query parameters with the browser's URL encoder.
fn with_query<'k, 'v>(
    url: &str,
    pairs: impl IntoIterator<Item = (&'k str, &'v str)>,
) -> Result<String, TransferError> {
    let url = Url::new(url).map_err(|_| TransferError::RequestCreationFailed)?;
    let search = url.search_params();
    for (key, value) in pairs {
        search.append(key, value);
    }
    Ok(url.href())
}

/// Multipart form with the file under the upload field.
fn multipart_body(payload: UploadPayload<'_>) -> Result<JsValue, TransferError> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(payload.bytes));
    let props = BlobPropertyBag::new();
    props.set_type(payload.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|_| TransferError::RequestCreationFailed)?;

    let form = FormData::new().map_err(|_| TransferError::RequestCreationFailed)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, payload.filename)
        .map_err(|_| TransferError::RequestCreationFailed)?;
    Ok(form.into())
}

async fn read_text(resp: &Response) -> Result<String, TransferError> {
    let text = JsFuture::from(resp.text().map_err(|_| TransferError::ResponseReadFailed)?)
        .await
        .map_err(|_| TransferError::ResponseReadFailed)?;
    text.as_string()
        .ok_or_else(|| TransferError::Decode("response body is not text".to_string()))
}
