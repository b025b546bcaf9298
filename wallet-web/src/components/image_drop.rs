//! Token icon dropzone
//!
//! Drag and drop onto the zone, or click the empty zone to open the file picker.
//! Once a file is chosen it is previewed through an object URL; hovering the
//! preview offers replace and remove.

use leptos::prelude::*;
use leptos::html::Input;
use shared::dto::token::is_supported_image;
use web_sys::{DragEvent, File, HtmlInputElement, Url};

use crate::utils::constants::IMAGE_ACCEPT;

/// The one object URL the preview currently shows.
///
/// Every URL handed out by `show` or `release` must be revoked by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PreviewSlot {
    url: Option<String>,
}

impl PreviewSlot {
    /// Show `next`, returning the URL it replaced
    fn show(&mut self, next: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.url, next)
    }

    /// Empty the slot on unmount
    fn release(&mut self) -> Option<String> {
        self.url.take()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

fn revoke(url: Option<String>) {
    if let Some(url) = url {
        let _ = Url::revoke_object_url(&url);
    }
}

#[component]
pub fn ImageDropzone(
    /// Selected icon; cleared by the page on reset
    file: RwSignal<Option<File>, LocalStorage>,
    /// Called with the file name on select and `None` on remove
    on_change: Callback<Option<String>>,
) -> impl IntoView {
    let input_ref = NodeRef::<Input>::new();
    let (hovered, set_hovered) = signal(false);
    let (dragging, set_dragging) = signal(false);
    let preview = RwSignal::new(PreviewSlot::default());

    // Keep one live object URL per selected file
    Effect::new(move |_| {
        let url = file.with(|f| f.as_ref().and_then(|f| Url::create_object_url_with_blob(f).ok()));
        revoke(preview.try_update(|p| p.show(url)).flatten());
    });

    // The minted card replaces the form without clearing the file first
    on_cleanup(move || revoke(preview.try_update_untracked(PreviewSlot::release).flatten()));

    let select = move |candidate: File| {
        if !is_supported_image(&candidate.type_()) {
            log::warn!("Ignoring unsupported image type '{}'", candidate.type_());
            return;
        }
        let name = candidate.name();
        file.set(Some(candidate));
        on_change.run(Some(name));
    };

    let open_picker = move || {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let remove = move || {
        file.set(None);
        set_hovered.set(false);
        on_change.run(None);
    };

    let on_input_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(chosen) = input.files().and_then(|files| files.get(0)) {
            select(chosen);
        }
        // Allow picking the same file again after a remove
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(dropped) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            select(dropped);
        }
    };

    view! {
        <div
            class="dropzone"
            class:dropzone-active=move || dragging.get()
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_dragging.set(true);
            }
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <input
                node_ref=input_ref
                type="file"
                accept=IMAGE_ACCEPT
                style="display: none;"
                on:change=on_input_change
            />
            {move || match preview.with(|p| p.url().map(str::to_string)) {
                Some(url) => view! {
                    <div
                        class="dropzone-preview"
                        on:mouseenter=move |_| set_hovered.set(true)
                        on:mouseleave=move |_| set_hovered.set(false)
                    >
                        <img src=url alt="Token image" class="dropzone-image"/>
                        {move || hovered.get().then(|| view! {
                            <div class="dropzone-overlay">
                                <button class="icon-button" title="Replace image" on:click=move |_| open_picker()>
                                    "✎"
                                </button>
                                <button class="icon-button" title="Remove image" on:click=move |_| remove()>
                                    "🗑"
                                </button>
                            </div>
                        })}
                    </div>
                }.into_any(),
                None => view! {
                    <div class="dropzone-empty" on:click=move |_| open_picker()>
                        <div class="dropzone-icon">"☁"</div>
                        <div class="dropzone-hint">"Click or drag image."</div>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
