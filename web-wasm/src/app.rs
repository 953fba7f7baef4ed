//! メインアプリケーションコンポーネント

use leptos::prelude::*;

use crate::api::predict::{self, BrowserFile};
use crate::components::{
    header::Header,
    result_panel::ResultPanel,
    submit_button::SubmitButton,
    upload_area::UploadArea,
};
use crate::settings::Settings;
use leaf_doctor_common::{LayoutMode, UploadForm};

/// フォーム状態（web_sys::Fileを持つためスレッドローカル）
pub type FormSignal = RwSignal<UploadForm<BrowserFile>, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let settings = Settings::from_document();
    let form: FormSignal = RwSignal::new_local(UploadForm::new());
    let is_busy = Signal::derive(move || form.with(|f| f.is_busy()));

    // 送信ハンドラ
    let on_submit = move |_: ()| submit(form, settings.endpoint);

    let notice = move || form.with(|f| f.notice());

    let upload_card = view! {
        <div class="upload-card">
            <Header />
            <UploadArea form=form />
            <SubmitButton is_busy=is_busy on_submit=on_submit />
            {move || notice().map(|n| view! {
                <div class="notice" role="alert">
                    <span>{n.message()}</span>
                    <button
                        class="btn btn-small btn-tertiary"
                        on:click=move |_| form.update(|f| f.dismiss_notice())
                    >
                        "×"
                    </button>
                </div>
            })}
        </div>
    };

    let result = view! {
        <ResultPanel form=form advisory=settings.advisory layout=settings.layout />
    };

    match settings.layout {
        LayoutMode::Single => view! {
            <div class=format!("container {}", settings.layout.css_class())>
                {upload_card}
                {result}
            </div>
        }
        .into_any(),
        LayoutMode::Split => view! {
            <div class=format!("container {}", settings.layout.css_class())>
                <section class="pane pane-form">{upload_card}</section>
                <section class="pane pane-result">{result}</section>
            </div>
        }
        .into_any(),
    }
}

/// 送信を開始し、完了したらフォームに反映する
///
/// 未選択・失敗はフォームの通知として表示される
fn submit(form: FormSignal, endpoint: &'static str) {
    let submission = match form.try_update(|f| f.begin_submit()) {
        Some(Ok(submission)) => submission,
        Some(Err(e)) => {
            log::debug!("submit not started: {}", e);
            return;
        }
        None => return,
    };

    wasm_bindgen_futures::spawn_local(async move {
        let outcome = predict::predict(endpoint, &submission.file).await;
        if let Err(e) = &outcome {
            log::error!("Error uploading file: {}", e);
        }

        if form
            .try_update(|f| f.finish_submit(submission.id, outcome))
            .is_none()
        {
            log::debug!("response discarded: form was unmounted");
        }
    });
}
