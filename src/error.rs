use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeafDoctorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("予測サービスに接続できません: {0}")]
    Http(#[from] reqwest::Error),

    #[error("予測サービスが応答しません (HTTP {0})")]
    ServiceDown(u16),

    #[error("診断に失敗しました: {0}")]
    Diagnosis(#[from] leaf_doctor_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LeafDoctorError>;
