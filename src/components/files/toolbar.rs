//! Filter toolbar: search, type, size bounds, upload date, size sort.

use filedesk_core::config::filter_options::{FILE_TYPES, SIZE_PRESETS_KB};
use filedesk_core::{FilterCriteria, SortOrder};
use leptos::prelude::*;
use leptos_icons::Icon;

use super::FileBrowser;
use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/files/toolbar.module.css");

/// Empty select value means "no bound".
fn parse_kb(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

fn kb_value(kb: Option<u64>) -> String {
    kb.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let browser = use_context::<FileBrowser>().expect("FileBrowser must be provided");

    let field = move |read: fn(&FilterCriteria) -> String| {
        move || ctx.session.with(|s| read(s.filters().criteria()))
    };

    let handle_search_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            browser.commit_now();
        }
    };

    let size_options = || {
        SIZE_PRESETS_KB
            .iter()
            .map(|(kb, label)| view! { <option value=kb.to_string()>{*label}</option> })
            .collect_view()
    };

    view! {
        <div class=css::toolbar role="search">
            <label class=css::search>
                <span class=css::searchIcon aria-hidden="true"><Icon icon=ic::SEARCH /></span>
                <input
                    type="search"
                    placeholder="Search files..."
                    aria-label="Search by filename"
                    prop:value=field(|c| c.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        browser.edit(|f| f.set_search(value));
                    }
                    on:keydown=handle_search_keydown
                />
            </label>

            <select
                aria-label="File type"
                prop:value=field(|c| c.file_type.clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    browser.edit(|f| f.set_file_type(value));
                }
            >
                {FILE_TYPES
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>

            <select
                aria-label="Minimum size"
                prop:value=field(|c| kb_value(c.min_size_kb))
                on:change=move |ev| {
                    let value = parse_kb(&event_target_value(&ev));
                    browser.edit(|f| f.set_min_size_kb(value));
                }
            >
                <option value="">"Min Size"</option>
                {size_options()}
            </select>

            <select
                aria-label="Maximum size"
                prop:value=field(|c| kb_value(c.max_size_kb))
                on:change=move |ev| {
                    let value = parse_kb(&event_target_value(&ev));
                    browser.edit(|f| f.set_max_size_kb(value));
                }
            >
                <option value="">"Max Size"</option>
                {size_options()}
            </select>

            <input
                type="date"
                aria-label="Upload date"
                prop:value=field(|c| c.uploaded_date.clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    browser.edit(|f| f.set_uploaded_date(value));
                }
            />

            <select
                aria-label="Sort by size"
                prop:value=field(|c| c.size_sort.map(|s| s.as_str().to_string()).unwrap_or_default())
                on:change=move |ev| {
                    let value = SortOrder::parse(&event_target_value(&ev));
                    browser.edit(|f| f.set_size_sort(value));
                }
            >
                <option value="">"Sort by Size"</option>
                <option value="asc">"Smallest first"</option>
                <option value="desc">"Largest first"</option>
            </select>

            <button
                class=css::clear
                disabled=move || ctx.session.with(|s| s.filters().is_clear())
                on:click=move |_| browser.clear()
            >
                "Clear All"
            </button>
        </div>
    }
}
