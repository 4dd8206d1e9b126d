//! File manager page.
//!
//! - [`Toolbar`] - search box and filter controls
//! - [`UploadButton`] - file picker that uploads unless the content exists
//! - [`FileList`] - loading / error / ready rendering of the listing

mod file_list;
mod hooks;
mod toolbar;
mod upload;

pub use file_list::FileList;
pub use hooks::FileBrowser;
pub use toolbar::Toolbar;
pub use upload::UploadButton;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_NAME, NOTICE_DURATION_MS};

stylance::import_crate_style!(css, "src/components/files/files.module.css");

/// Page root: creates the [`FileBrowser`] and loads the first listing.
#[component]
pub fn FileManager() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let browser = FileBrowser::new(ctx);
    provide_context(browser);
    browser.start();

    view! {
        <main class=css::page>
            <header class=css::header>
                <span class=css::headerIcon><Icon icon=ic::DIRECTORY /></span>
                <h1 class=css::title>{APP_NAME}</h1>
                <UploadButton />
            </header>
            <NoticeBar />
            <Toolbar />
            <FileList />
        </main>
    }
}

/// Latest notice, cleared after a few seconds or on dismiss.
#[component]
fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    Effect::new(move |_| {
        let Some(shown) = ctx.notice.get() else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_DURATION_MS).await;
            // A newer notice keeps its own timer
            if ctx.notice.try_get_untracked().flatten().as_ref() == Some(&shown) {
                ctx.notice.try_set(None);
            }
        });
    });

    move || {
        ctx.notice.get().map(|notice| {
            let class = if notice.is_error() {
                format!("{} {}", css::notice, css::noticeError)
            } else {
                css::notice.to_string()
            };
            view! {
                <div class=class role="status">
                    <span>{notice.message().to_string()}</span>
                    <button
                        class=css::dismiss
                        aria-label="Dismiss"
                        on:click=move |_| ctx.notice.set(None)
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            }
        })
    }
}
