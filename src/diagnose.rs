//! 診断ワークフロー
//!
//! 共通の `UploadForm` を使い、ファイル選択 → 送信 → 結果反映 を1件ずつ行う。
//! 失敗は1件分の結果として返し、バッチは止めない。

use crate::client::PredictClient;
use crate::scanner::ImageInfo;
use leaf_doctor_common::{Advisory, AdvisoryTable, Notice, Phase, Prediction, UploadForm};
use std::fmt;

/// 1件分の失敗理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// フォームが出した通知（通信・応答の失敗）
    Notice(Notice),
    /// 画像ファイルを読み込めなかった
    Unreadable(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Notice(notice) => f.write_str(notice.message()),
            Failure::Unreadable(reason) => write!(f, "画像を読み込めません: {}", reason),
        }
    }
}

/// 1件分の診断結果
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub file_name: String,
    pub outcome: Result<Prediction, Failure>,
    /// 結果ラベルに対応するアドバイス（表にない・失敗時はNone）
    pub advisory: Option<Advisory>,
}

impl Diagnosis {
    fn failed(image: &ImageInfo, failure: Failure) -> Self {
        Self {
            file_name: image.file_name.clone(),
            outcome: Err(failure),
            advisory: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// 1枚の画像を診断する
pub async fn diagnose_image(
    client: &PredictClient,
    image: &ImageInfo,
    table: &AdvisoryTable,
) -> Diagnosis {
    let file = match image.load() {
        Ok(file) => file,
        Err(e) => {
            log::warn!("{}: {}", image.file_name, e);
            return Diagnosis::failed(image, Failure::Unreadable(e.to_string()));
        }
    };

    let mut form = UploadForm::new();
    form.select_file(file);

    let submission = match form.begin_submit() {
        Ok(submission) => submission,
        Err(e) => {
            log::error!("{}: {}", image.file_name, e);
            let notice = form.notice().unwrap_or(Notice::UploadFailed);
            return Diagnosis::failed(image, Failure::Notice(notice));
        }
    };
    let outcome = client.predict(&submission.file).await;
    form.finish_submit(submission.id, outcome);

    let outcome = match (form.phase(), form.result()) {
        (Phase::Succeeded, Some(prediction)) => Ok(prediction.clone()),
        _ => Err(Failure::Notice(form.notice().unwrap_or(Notice::UploadFailed))),
    };

    Diagnosis {
        file_name: image.file_name.clone(),
        outcome,
        advisory: form.advisory(table).cloned(),
    }
}

/// 複数画像を順番に診断する（同時に送信するのは1件まで）
pub async fn diagnose_all<F>(
    client: &PredictClient,
    images: &[ImageInfo],
    table: &AdvisoryTable,
    mut on_done: F,
) -> Vec<Diagnosis>
where
    F: FnMut(&Diagnosis),
{
    let mut results = Vec::with_capacity(images.len());
    for image in images {
        let diagnosis = diagnose_image(client, image, table).await;
        on_done(&diagnosis);
        results.push(diagnosis);
    }
    results
}
