//! 予測サービス呼び出し（fetch + FormData）

use leaf_doctor_common::{
    self as common, predict_url, prediction_from_value, FileHandle, Prediction, UPLOAD_FIELD,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

/// ブラウザの `File` をフォームで扱うためのラッパー
#[derive(Clone)]
pub struct BrowserFile(pub web_sys::File);

impl FileHandle for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn media_type(&self) -> String {
        self.0.type_()
    }
}

fn js_error(e: JsValue) -> common::Error {
    common::Error::Transport(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// `POST {endpoint}/predict` に画像を送信
///
/// Content-Typeはブラウザがboundary付きで設定する
pub async fn predict(endpoint: &str, file: &BrowserFile) -> common::Result<Prediction> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &file.0, &file.0.name())
        .map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = predict_url(endpoint);
    log::debug!("POST {}", url);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;

    let window = web_sys::window()
        .ok_or_else(|| common::Error::Transport("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(common::Error::Status(resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let value: serde_json::Value = serde_wasm_bindgen::from_value(json)
        .map_err(|e| common::Error::Transport(e.to_string()))?;

    prediction_from_value(value)
}
