//! 予測サービスのレスポンス解析
//!
//! `POST /predict` が返すJSONを明示的なスキーマで検証し、`Prediction` に変換する。

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Heatmap, Prediction};

/// `/predict` レスポンスのスキーマ
///
/// 余分なフィールドは無視する。型の不一致はserdeのエラーになる。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "class", default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// hexエンコードされた画像
    #[serde(default)]
    pub image: Option<String>,
}

impl PredictResponse {
    /// 検証して `Prediction` に変換
    pub fn into_prediction(self) -> Result<Prediction> {
        let label = self.label.ok_or(Error::MissingField("class"))?;
        let confidence = self.confidence.ok_or(Error::MissingField("confidence"))?;

        let heatmap = match self.image.as_deref() {
            Some(encoded) if !encoded.trim().is_empty() => Some(Heatmap::from_hex(encoded)?),
            _ => None,
        };

        Ok(Prediction {
            label,
            confidence,
            heatmap,
        })
    }
}

/// レスポンス本文（JSON文字列）を解析
pub fn parse_predict_response(body: &str) -> Result<Prediction> {
    let response: PredictResponse = serde_json::from_str(body)?;
    response.into_prediction()
}

/// 解析済みのJSON値から変換（WASM側の `Response::json()` 用）
pub fn prediction_from_value(value: serde_json::Value) -> Result<Prediction> {
    let response: PredictResponse = serde_json::from_value(value)?;
    response.into_prediction()
}
