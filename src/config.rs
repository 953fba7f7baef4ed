use crate::error::{LeafDoctorError, Result};
use leaf_doctor_common::{AdvisoryTable, Crop, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 予測サービスのURLを上書きする環境変数
pub const ENDPOINT_ENV: &str = "LEAF_DOCTOR_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub crop: Crop,
    /// 独自のアドバイス表（JSON）。指定時はcropより優先
    pub advisory_path: Option<PathBuf>,
    /// 未指定ならHTTPクライアントの既定値
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            crop: Crop::default(),
            advisory_path: None,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LeafDoctorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("leaf-doctor").join("config.json"))
    }

    /// 実際に使う予測サービスURL
    ///
    /// 優先順位: コマンドライン > 環境変数 > 設定ファイル
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        self.resolve_endpoint_with(flag, std::env::var(ENDPOINT_ENV).ok())
    }

    /// 環境変数の値を渡して解決する
    pub fn resolve_endpoint_with(&self, flag: Option<&str>, env: Option<String>) -> String {
        if let Some(endpoint) = flag {
            return endpoint.to_string();
        }
        match env {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.trim().to_string(),
            _ => self.endpoint.clone(),
        }
    }

    /// 送信のタイムアウト（設定されている場合のみ）
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// 実際に使うアドバイス表
    ///
    /// 優先順位: --advisory > --crop > 設定ファイルのadvisory_path > 設定ファイルのcrop
    pub fn resolve_advisory(&self, file: Option<&Path>, crop: Option<Crop>) -> Result<AdvisoryTable> {
        if let Some(path) = file {
            return Self::read_advisory(path);
        }
        if let Some(crop) = crop {
            return Ok(AdvisoryTable::builtin(crop).clone());
        }
        match &self.advisory_path {
            Some(path) => Self::read_advisory(path),
            None => Ok(AdvisoryTable::builtin(self.crop).clone()),
        }
    }

    fn read_advisory(path: &Path) -> Result<AdvisoryTable> {
        if !path.exists() {
            return Err(LeafDoctorError::FileNotFound(path.display().to_string()));
        }
        Ok(AdvisoryTable::from_file(path)?)
    }

    pub fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
    }

    /// 0は既定値に戻す
    pub fn set_timeout(&mut self, seconds: u64) {
        self.timeout_seconds = (seconds > 0).then_some(seconds);
    }

    pub fn set_crop(&mut self, crop: Crop) {
        self.crop = crop;
        self.advisory_path = None;
    }
}
