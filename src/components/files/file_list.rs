//! File list component.
//!
//! Renders exactly one of the loading, error, or ready states.

use filedesk_core::{FileRecord, ViewState};
use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use super::FileBrowser;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::utils::format::{format_file_type, format_size_kb, format_uploaded_at};

stylance::import_crate_style!(css, "src/components/files/file_list.module.css");

/// Icon for a record based on its MIME category.
fn get_icon(record: &FileRecord) -> IconData {
    match record.category() {
        "image" => ic::FILE_IMAGE,
        "video" => ic::FILE_VIDEO,
        "text" => ic::FILE_TEXT,
        _ if record.file_type == "application/pdf" => ic::FILE_PDF,
        _ => ic::FILE,
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let browser = use_context::<FileBrowser>().expect("FileBrowser must be provided");

    let view_state = Memo::new(move |_| ctx.session.with(|s| s.view().clone()));

    move || match view_state.get() {
        ViewState::Loading => view! {
            <div class=css::placeholder role="status">"Loading..."</div>
        }
        .into_any(),
        ViewState::Error(e) => view! {
            <div class=format!("{} {}", css::placeholder, css::error) role="alert">
                <span class=css::errorIcon><Icon icon=ic::ALERT /></span>
                <span>{format!("Error: {e}")}</span>
                <button class=css::retry on:click=move |_| browser.retry()>
                    <Icon icon=ic::RETRY />
                    " Retry"
                </button>
            </div>
        }
        .into_any(),
        ViewState::Ready(records) if records.is_empty() => view! {
            <div class=css::placeholder>"No files"</div>
        }
        .into_any(),
        ViewState::Ready(records) => view! {
            <div class=css::list role="grid" aria-label="File list">
                <div class=css::listHeader role="row">
                    <span class=css::headerIcon></span>
                    <span class=css::headerName>"Name"</span>
                    <span class=css::headerType>"Type"</span>
                    <span class=css::headerSize>"Size"</span>
                    <span class=css::headerDate>"Uploaded"</span>
                    <span class=css::headerActions></span>
                </div>
                <For
                    each=move || records.clone()
                    key=|record| record.id.clone()
                    children=move |record| view! { <FileListItem record=record /> }
                />
            </div>
        }
        .into_any(),
    }
}

#[component]
fn FileListItem(record: FileRecord) -> impl IntoView {
    let browser = use_context::<FileBrowser>().expect("FileBrowser must be provided");

    let icon = get_icon(&record);
    let type_label = format_file_type(&record.file_type);
    let size = format_size_kb(record.size_kb());
    let uploaded = format_uploaded_at(&record.uploaded_at);
    let aria_label = format!("File: {}", record.original_filename);

    let for_download = record.clone();
    let for_delete = record.clone();

    view! {
        <div class=css::listItem role="row" aria-label=aria_label>
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <span class=css::name title=record.file_type.clone()>
                {record.original_filename.clone()}
            </span>
            <span class=css::itemType>{type_label}</span>
            <span class=css::size>{size}</span>
            <span class=css::itemDate>{uploaded}</span>
            <span class=css::actions>
                <button
                    class=css::action
                    aria-label="Download"
                    on:click=move |_| browser.download(for_download.clone())
                >
                    <Icon icon=ic::DOWNLOAD />
                </button>
                <button
                    class=format!("{} {}", css::action, css::danger)
                    aria-label="Delete"
                    on:click=move |_| browser.delete(for_delete.clone())
                >
                    <Icon icon=ic::TRASH />
                </button>
            </span>
        </div>
    }
}
