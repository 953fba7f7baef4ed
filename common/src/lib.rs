//! Leaf Doctor Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod advisory;
pub mod error;
pub mod form;
pub mod layout;
pub mod preview;
pub mod response;
pub mod types;

pub use advisory::{Advisory, AdvisoryTable, Crop};
pub use error::{Error, Result};
pub use form::{FileHandle, Notice, Phase, PreviewTicket, SelectedFile, Submission, SubmissionId, UploadForm};
pub use layout::LayoutMode;
pub use response::{parse_predict_response, prediction_from_value, PredictResponse};
pub use types::{format_confidence, Heatmap, Prediction};

/// デフォルトの予測サービス
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// `{endpoint}/predict` を組み立てる（末尾スラッシュは無視）
pub fn predict_url(endpoint: &str) -> String {
    format!("{}/predict", endpoint.trim_end_matches('/'))
}

/// `{endpoint}/ping` を組み立てる
pub fn ping_url(endpoint: &str) -> String {
    format!("{}/ping", endpoint.trim_end_matches('/'))
}
