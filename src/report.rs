//! 診断結果のテキスト出力

use crate::diagnose::Diagnosis;
use leaf_doctor_common::{Advisory, Prediction};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 1件分の結果を人が読む形式で組み立てる
///
/// アドバイスがない（表にないラベル）場合は症状・対処法を省く
pub fn render_prediction(prediction: &Prediction, advisory: Option<&Advisory>) -> String {
    let mut out = format!(
        "  Predicted Disease: {}\n  Confidence: {}\n",
        prediction.label,
        prediction.confidence_percent()
    );

    if let Some(advisory) = advisory {
        out.push_str(&format!(
            "  Common Symptoms:\n    {}\n  Recommended Treatment:\n    {}\n",
            advisory.symptoms, advisory.treatment
        ));
    }

    if let Some(heatmap) = &prediction.heatmap {
        out.push_str(&format!(
            "  Heatmap: {} bytes ({})\n",
            heatmap.bytes.len(),
            heatmap.media_type
        ));
    }

    out
}

/// `--json` 出力の1行分
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub file_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(diagnosis: &'a Diagnosis) -> Self {
        let advisory = diagnosis.advisory.as_ref();
        let (label, confidence, error) = match &diagnosis.outcome {
            Ok(prediction) => (Some(prediction.label.as_str()), Some(prediction.confidence), None),
            Err(failure) => (None, None, Some(failure.to_string())),
        };
        Self {
            file_name: &diagnosis.file_name,
            label,
            confidence,
            symptoms: advisory.map(|a| a.symptoms.as_str()),
            treatment: advisory.map(|a| a.treatment.as_str()),
            error,
        }
    }
}

/// ヒートマップの保存先
///
/// 1件なら指定パスそのまま、複数件なら `<stem>-<画像名>.jpg`
pub fn heatmap_path(base: &Path, file_name: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "heatmap".to_string());
    let image_stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    base.with_file_name(format!("{}-{}.jpg", stem, image_stem))
}

/// 成功した診断のヒートマップを保存する
///
/// ヒートマップがなければNone。書き込み失敗はその1件分のErrとして返す。
pub fn save_heatmap(
    diagnosis: &Diagnosis,
    base: &Path,
    multiple: bool,
) -> Option<std::io::Result<PathBuf>> {
    let heatmap = diagnosis.outcome.as_ref().ok()?.heatmap.as_ref()?;
    let path = heatmap_path(base, &diagnosis.file_name, multiple);
    Some(std::fs::write(&path, &heatmap.bytes).map(|_| path))
}
