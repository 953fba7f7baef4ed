//! 診断結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Prediction: 予測サービスの応答を検証・デコードした結果
//! - Heatmap: 応答に含まれる任意の画像（hexデコード済み）

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::preview;

/// ヒートマップ画像のMIMEタイプ（サーバはJPEGで返す）
pub const HEATMAP_MEDIA_TYPE: &str = "image/jpeg";

/// 応答に添付された画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl Heatmap {
    /// hex文字列を2文字ずつバイトへデコード
    ///
    /// 奇数長や16進以外の文字は `Error::Heatmap` になる
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded.trim())?;
        Ok(Self {
            bytes,
            media_type: HEATMAP_MEDIA_TYPE.to_string(),
        })
    }

    /// `<img src>` に渡せるData URL
    pub fn to_data_url(&self) -> String {
        preview::data_url(&self.media_type, &self.bytes)
    }
}

/// 病害予測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// 予測された病害名（アドバイス表のキー）
    pub label: String,
    /// 信頼度（通常 0.0〜1.0）
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Heatmap>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            heatmap: None,
        }
    }

    /// 表示用の信頼度（百分率・小数2桁）
    pub fn confidence_percent(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// 0.97 → "97.00%"
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
