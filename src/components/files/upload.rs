//! Upload button backed by a hidden file input.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use super::FileBrowser;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/files/files.module.css");

#[component]
pub fn UploadButton() -> impl IntoView {
    let browser = use_context::<FileBrowser>().expect("FileBrowser must be provided");
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let open_picker = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let handle_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(files) = input.files() {
            for index in 0..files.length() {
                if let Some(file) = files.get(index) {
                    browser.upload(file);
                }
            }
        }
        // Allow picking the same file again
        input.set_value("");
    };

    view! {
        <button class=css::upload on:click=open_picker>
            <Icon icon=ic::UPLOAD />
            " Upload"
        </button>
        <input
            node_ref=input_ref
            type="file"
            multiple=true
            class=css::hiddenInput
            on:change=handle_change
        />
    }
}
