//! 予測サービスのHTTPクライアント
//!
//! `POST /predict` にmultipartで画像を送り、`GET /ping` で死活を確認する。

use crate::error::{LeafDoctorError, Result};
use leaf_doctor_common::{
    self as common, parse_predict_response, ping_url, predict_url, Prediction, SelectedFile,
    UPLOAD_FIELD,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct PredictClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictClient {
    /// タイムアウト未指定ならreqwestの既定値のまま
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 画像を送信して予測結果を受け取る
    ///
    /// 失敗はすべて共通エラー型で返し、そのままフォームに渡せるようにする
    pub async fn predict(&self, file: &SelectedFile) -> common::Result<Prediction> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(transport)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = predict_url(&self.endpoint);
        log::debug!("POST {} ({} bytes)", url, file.bytes.len());

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(common::Error::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(transport)?;
        parse_predict_response(&body)
    }

    /// 死活確認。サービスの応答本文を返す
    pub async fn ping(&self) -> Result<String> {
        let url = ping_url(&self.endpoint);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LeafDoctorError::ServiceDown(status.as_u16()));
        }

        let body = response.text().await?;
        // FastAPIは文字列をJSONで返す
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }
}

fn transport(e: reqwest::Error) -> common::Error {
    common::Error::Transport(e.to_string())
}
