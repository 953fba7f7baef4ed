//! 起動時設定
//!
//! `index.html` の `<meta name="leaf-doctor:...">` と
//! `<script type="application/json" id="leaf-doctor-advisory">` から読む。

use leaf_doctor_common::{AdvisoryTable, Crop, LayoutMode, DEFAULT_ENDPOINT};

const META_ENDPOINT: &str = "leaf-doctor:endpoint";
const META_CROP: &str = "leaf-doctor:crop";
const META_LAYOUT: &str = "leaf-doctor:layout";
const ADVISORY_SCRIPT_ID: &str = "leaf-doctor-advisory";

#[derive(Clone, Copy)]
pub struct Settings {
    pub endpoint: &'static str,
    pub layout: LayoutMode,
    pub advisory: &'static AdvisoryTable,
}

impl Settings {
    /// ドキュメントから読み込む
    pub fn from_document() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let meta = |name: &str| {
            document
                .as_ref()
                .and_then(|d| d.query_selector(&format!("meta[name=\"{}\"]", name)).ok().flatten())
                .and_then(|el| el.get_attribute("content"))
        };
        let advisory_json = document
            .as_ref()
            .and_then(|d| d.get_element_by_id(ADVISORY_SCRIPT_ID))
            .and_then(|el| el.text_content());

        Self::resolve(meta(META_ENDPOINT), meta(META_CROP), meta(META_LAYOUT), advisory_json)
    }

    /// 値を検証して設定を組み立てる。不正な値は警告してデフォルトに戻す
    ///
    /// ページの寿命の間だけ使う値なので `'static` にリークさせる
    pub fn resolve(
        endpoint: Option<String>,
        crop: Option<String>,
        layout: Option<String>,
        advisory_json: Option<String>,
    ) -> Self {
        let endpoint: &'static str = match endpoint {
            Some(e) if !e.trim().is_empty() => &*Box::leak(e.trim().to_string().into_boxed_str()),
            _ => DEFAULT_ENDPOINT,
        };

        let layout = layout
            .and_then(|l| {
                l.parse::<LayoutMode>()
                    .map_err(|e| log::warn!("{}", e))
                    .ok()
            })
            .unwrap_or_default();

        let preset = crop
            .and_then(|c| AdvisoryTable::from_preset(&c).map_err(|e| log::warn!("{}", e)).ok())
            .unwrap_or_else(|| AdvisoryTable::builtin(Crop::default()));

        let advisory: &'static AdvisoryTable = match advisory_json {
            Some(json) if !json.trim().is_empty() => match AdvisoryTable::from_json(&json) {
                Ok(table) => &*Box::leak(Box::new(table)),
                Err(e) => {
                    log::warn!("advisory table ignored: {}", e);
                    preset
                }
            },
            _ => preset,
        };

        log::info!(
            "endpoint={} layout={} advisory entries={}",
            endpoint,
            layout.as_str(),
            advisory.len()
        );

        Self {
            endpoint,
            layout,
            advisory,
        }
    }
}
