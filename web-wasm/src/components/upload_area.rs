//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップとファイル選択を受け付け、画像ならプレビューを表示する

use leptos::prelude::*;
use web_sys::{DragEvent, HtmlInputElement};

use crate::api::predict::BrowserFile;
use crate::app::FormSignal;
use leaf_doctor_common::PreviewTicket;

const FILE_INPUT_ID: &str = "fileInput";

#[component]
pub fn UploadArea(form: FormSignal) -> impl IntoView {
    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        form.update(|f| f.drag_enter());
    };

    let on_dragover = move |ev: DragEvent| {
        // preventDefaultしないとdropが発火しない
        ev.prevent_default();
        if !form.with_untracked(|f| f.is_dragging()) {
            form.update(|f| f.drag_over());
        }
    };

    let on_dragleave = move |_: DragEvent| {
        form.update(|f| f.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
            .map(BrowserFile);
        let ticket = form.try_update(|f| f.drop_file(file.clone())).flatten();
        if let (Some(ticket), Some(file)) = (ticket, file) {
            spawn_preview(form, ticket, file);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)).map(BrowserFile) else {
            return;
        };
        if let Some(ticket) = form.try_update(|f| f.select_file(file.clone())).flatten() {
            spawn_preview(form, ticket, file);
        }
    };

    view! {
        <div
            class=move || {
                if form.with(|f| f.is_dragging()) {
                    "upload-area dragover"
                } else {
                    "upload-area"
                }
            }
            on:dragenter=on_dragenter
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            {move || {
                form.with(|f| match (f.preview(), f.file()) {
                    (Some(src), _) => view! {
                        <div class="preview">
                            <img src=src.to_string() alt="Preview" />
                        </div>
                    }
                    .into_any(),
                    (None, Some(file)) => view! {
                        <p class="file-name">{file.0.name()}</p>
                    }
                    .into_any(),
                    (None, None) => view! {
                        <div class="upload-icon">"🌿"</div>
                        <p>"Drag and drop an image here, or click to select one"</p>
                    }
                    .into_any(),
                })
            }}
            <input
                type="file"
                id=FILE_INPUT_ID
                class="hidden"
                accept="image/*"
                on:change=on_change
            />
        </div>
        <label for=FILE_INPUT_ID class="btn btn-secondary choose-file">
            "Choose File"
        </label>
    }
}

/// 画像をData URLとして読み込み、フォームに反映する
///
/// 読み込み中に別のファイルが選ばれた場合やコンポーネント破棄後は捨てられる
fn spawn_preview(form: FormSignal, ticket: PreviewTicket, file: BrowserFile) {
    wasm_bindgen_futures::spawn_local(async move {
        let blob = gloo::file::File::from(file.0);
        match gloo::file::futures::read_as_data_url(&blob).await {
            Ok(data_url) => {
                if form.try_update(|f| f.apply_preview(ticket, data_url)).is_none() {
                    log::debug!("preview arrived after unmount");
                }
            }
            Err(e) => log::warn!("preview failed: {}", e),
        }
    });
}
