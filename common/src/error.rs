//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// ファイル未選択のまま送信された
    #[error("Please select or drop a file first!")]
    NoFileSelected,

    /// 送信中に再送信された
    #[error("A submission is already in progress")]
    SubmitInFlight,

    /// レスポンスに必須フィールドがない
    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),

    /// ヒートマップのhexデコード失敗
    #[error("Heatmap decode error: {0}")]
    Heatmap(#[from] hex::FromHexError),

    /// 通信エラー（ネットワーク・CORS等）
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx以外のHTTPステータス
    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Unknown advisory preset: {0} (tomato/apple)")]
    UnknownPreset(String),
}

impl Error {
    /// レスポンス解釈に失敗したエラーか
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Json(_) | Error::MissingField(_) | Error::Heatmap(_))
    }

    /// 通信層のエラーか
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
