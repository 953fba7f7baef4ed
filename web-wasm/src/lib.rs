//! Leaf Doctor Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod settings;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    log::info!("Leaf Doctor starting...");
    leptos::mount::mount_to_body(app::App);
}
