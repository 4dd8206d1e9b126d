//! Browser glue between the UI and [`BrowseSession`].
//!
//! [`FileBrowser`] turns user actions into session transitions and runs the
//! resulting fetch tickets on the local executor.

use filedesk_core::client::BrowserSave;
use filedesk_core::{
    BrowseSession, FetchTicket, FileRecord, FilterState, Removal, TimerSlot, TransferError,
    UploadOutcome, console,
};
use gloo_timers::callback::Timeout;
use js_sys::Uint8Array;
use leptos::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use crate::app::{AppContext, Notice};

fn now() -> u64 {
    js_sys::Date::now() as u64
}

/// Action handle for the file manager. `Copy`, like the context it wraps.
#[derive(Clone, Copy)]
pub struct FileBrowser {
    ctx: AppContext,
    /// Debounce timer for the pending edit, if any
    timer: StoredValue<TimerSlot<Timeout>, LocalStorage>,
}

impl FileBrowser {
    /// Create the handle. Unmounting cancels the timer and drops any
    /// uncommitted edit.
    pub fn new(ctx: AppContext) -> Self {
        let timer = StoredValue::new_local(TimerSlot::new());
        on_cleanup(move || {
            timer.try_update_value(TimerSlot::disarm);
            ctx.session.try_update_untracked(BrowseSession::cancel_pending);
        });
        Self { ctx, timer }
    }

    /// Load the initial listing.
    pub fn start(self) {
        let ticket = self.ctx.session.try_update(BrowseSession::start).flatten();
        self.dispatch(ticket);
    }

    /// Apply a filter edit; the fetch happens once input goes quiet.
    pub fn edit(self, f: impl FnOnce(&mut FilterState)) {
        self.ctx.session.update(|s| s.edit(now(), f));
        self.schedule();
    }

    /// Commit the pending edit now (Enter in the search box).
    pub fn commit_now(self) {
        self.timer.try_update_value(TimerSlot::disarm);
        let ticket = self.ctx.session.try_update(BrowseSession::commit_now).flatten();
        self.dispatch(ticket);
    }

    /// Reset all filters and list everything immediately.
    pub fn clear(self) {
        self.timer.try_update_value(TimerSlot::disarm);
        let ticket = self.ctx.session.try_update(BrowseSession::clear).flatten();
        self.dispatch(ticket);
    }

    pub fn retry(self) {
        let ticket = self.ctx.session.try_update(BrowseSession::retry).flatten();
        self.dispatch(ticket);
    }

    /// Refresh the listing after a mutation.
    pub fn refresh(self) {
        let ticket = self.ctx.session.try_update(BrowseSession::invalidate).flatten();
        self.dispatch(ticket);
    }

    pub fn delete(self, record: FileRecord) {
        let directory = self.ctx.directory.get_value();
        spawn_local(async move {
            match directory.delete(&record.id).await {
                Ok(Removal::Deleted) => {
                    self.ctx.notify(Notice::Info(format!(
                        "Deleted {}",
                        record.original_filename
                    )));
                    self.refresh();
                }
                Ok(Removal::AlreadyGone) => {
                    self.ctx.notify(Notice::Info(format!(
                        "{} was already deleted",
                        record.original_filename
                    )));
                    self.refresh();
                }
                Err(e) => {
                    console::error(&format!("Delete of {} failed: {e}", record.id));
                    self.ctx.notify(Notice::Error(format!("Delete failed: {e}")));
                }
            }
        });
    }

    pub fn download(self, record: FileRecord) {
        let directory = self.ctx.directory.get_value();
        spawn_local(async move {
            if let Err(e) = directory
                .download(&record.locator, &record.original_filename, &BrowserSave)
                .await
            {
                console::error(&format!("Download of {} failed: {e}", record.locator));
                self.ctx.notify(Notice::Error(format!("Download failed: {e}")));
            }
        });
    }

    /// Upload a picked file unless identical content is already stored.
    pub fn upload(self, file: web_sys::File) {
        let directory = self.ctx.directory.get_value();
        spawn_local(async move {
            let filename = file.name();
            let bytes = match read_file(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.ctx.notify(Notice::Error(format!("Could not read {filename}: {e}")));
                    return;
                }
            };

            match directory.upload_unique(&bytes, &filename).await {
                Ok(UploadOutcome::Uploaded(record)) => {
                    self.ctx.notify(Notice::Info(format!(
                        "Uploaded {}",
                        record.original_filename
                    )));
                    self.refresh();
                }
                Ok(UploadOutcome::Duplicate(existing)) => {
                    self.ctx.notify(Notice::Info(format!(
                        "{filename} is already stored as {}",
                        existing.original_filename
                    )));
                }
                Err(TransferError::Conflict { existing_id }) => {
                    self.ctx.notify(Notice::Info(format!(
                        "{filename} is already stored (id {existing_id})"
                    )));
                }
                Err(e) => {
                    console::error(&format!("Upload of {filename} failed: {e}"));
                    self.ctx.notify(Notice::Error(format!("Upload failed: {e}")));
                }
            }
        });
    }

    /// Arm the debounce timer for the pending edit, cancelling the previous one.
    fn schedule(self) {
        let Some(delay) = self.ctx.session.with_untracked(|s| s.remaining(now())) else {
            return;
        };
        let delay = u32::try_from(delay).unwrap_or(u32::MAX);
        let timeout = Timeout::new(delay, move || self.commit_due());
        self.timer.try_update_value(|slot| slot.arm(timeout));
    }

    fn commit_due(self) {
        self.timer.try_update_value(TimerSlot::disarm);
        match self.ctx.session.try_update(|s| s.tick(now())) {
            Some(Some(ticket)) => self.dispatch(Some(ticket)),
            // Timer fired a little before the clock reached the deadline
            Some(None) if self.ctx.session.with_untracked(BrowseSession::is_commit_pending) => {
                self.schedule();
            }
            _ => {}
        }
    }

    fn dispatch(self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let directory = self.ctx.directory.get_value();
        let session = self.ctx.session;
        spawn_local(async move {
            let result = directory.list_signature(ticket.signature()).await;
            if let Err(e) = &result {
                console::error(&format!("Listing {} failed: {e}", ticket.signature()));
            }
            session.try_update(|s| s.complete(ticket, result));
        });
    }
}

async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| e.as_string().unwrap_or_else(|| "read failed".to_string()))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}
