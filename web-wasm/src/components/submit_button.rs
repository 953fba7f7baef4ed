//! 送信ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn SubmitButton<F>(
    is_busy: Signal<bool>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <button
            class="btn btn-primary submit"
            disabled=move || is_busy.get()
            on:click={
                let on_submit = on_submit.clone();
                move |_| on_submit(())
            }
        >
            {move || if is_busy.get() { "Uploading..." } else { "Upload" }}
        </button>
    }
}
