//! アップロードフォームの状態機械
//!
//! ファイル選択 → 送信 → 結果表示 の1サイクルを管理する。
//! 通信やDOM操作は持たず、CLIとWeb(WASM)の両方から駆動される。
//!
//! ```text
//! Idle ──select──▶ FileSelected ──begin_submit──▶ Submitting ──ok──▶ Succeeded
//!                        ▲                             │
//!                        └──── retry (Failed) ◀──err───┘
//! ```

use crate::advisory::{Advisory, AdvisoryTable};
use crate::error::{Error, Result};
use crate::preview;
use crate::types::Prediction;

/// フォームが保持するファイルハンドル
///
/// ブラウザの `File` やネイティブのバイト列を同じ状態機械で扱うための境界
pub trait FileHandle: Clone {
    fn name(&self) -> String;
    fn media_type(&self) -> String;

    fn is_image(&self) -> bool {
        preview::is_image_media_type(&self.media_type())
    }
}

/// メモリ上に読み込んだファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// ファイル名の拡張子からMIMEタイプを決める
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = preview::media_type_from_file_name(&name);
        Self::new(name, media_type, bytes)
    }
}

impl FileHandle for SelectedFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// フォームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::FileSelected => "file-selected",
            Phase::Submitting => "submitting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

/// ユーザーに表示する通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// ファイル未選択で送信
    SelectFileFirst,
    /// 通信失敗・応答の解釈失敗（詳細は出さない）
    UploadFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SelectFileFirst => "Please select or drop a file first!",
            Notice::UploadFailed => "File upload failed.",
        }
    }
}

/// プレビュー計算の引換券。古い選択に対する結果を捨てるために使う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
}

/// 送信ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// 開始された送信。送信するファイルのコピーを持つ
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub id: SubmissionId,
    pub file: F,
}

/// アップロードフォーム
#[derive(Debug, Clone)]
pub struct UploadForm<F = SelectedFile> {
    file: Option<F>,
    preview: Option<String>,
    preview_generation: u64,
    dragging: bool,
    phase: Phase,
    result: Option<Prediction>,
    notice: Option<Notice>,
    next_submission: u64,
    in_flight: Option<SubmissionId>,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            preview_generation: 0,
            dragging: false,
            phase: Phase::Idle,
            result: None,
            notice: None,
            next_submission: 0,
            in_flight: None,
        }
    }
}

impl<F: FileHandle> UploadForm<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを差し替える
    ///
    /// 画像なら `PreviewTicket` を返す。呼び出し側はプレビューを計算して
    /// `apply_preview` に渡す。送信中の差し替えは送信を中断しない。
    pub fn select_file(&mut self, file: F) -> Option<PreviewTicket> {
        log::debug!("file selected: {} ({})", file.name(), file.media_type());

        let is_image = file.is_image();
        self.file = Some(file);
        self.preview = None;
        self.preview_generation += 1;
        self.result = None;
        self.notice = None;
        if self.phase != Phase::Submitting {
            self.phase = Phase::FileSelected;
        }

        is_image.then_some(PreviewTicket {
            generation: self.preview_generation,
        })
    }

    /// プレビューを反映。選択が変わっていれば捨ててfalseを返す
    pub fn apply_preview(&mut self, ticket: PreviewTicket, data_url: String) -> bool {
        if ticket.generation != self.preview_generation || self.file.is_none() {
            log::debug!("stale preview discarded");
            return false;
        }
        self.preview = Some(data_url);
        true
    }

    /// 送信を開始する
    ///
    /// ファイル未選択なら通知を出して `Error::NoFileSelected`。
    /// 送信中なら何もせず `Error::SubmitInFlight`。
    pub fn begin_submit(&mut self) -> Result<Submission<F>> {
        if self.in_flight.is_some() {
            log::debug!("submit ignored: request already in flight");
            return Err(Error::SubmitInFlight);
        }
        let Some(file) = self.file.clone() else {
            self.notice = Some(Notice::SelectFileFirst);
            return Err(Error::NoFileSelected);
        };

        self.next_submission += 1;
        let id = SubmissionId(self.next_submission);
        self.in_flight = Some(id);
        self.phase = Phase::Submitting;
        self.notice = None;

        log::info!("submitting {}", file.name());
        Ok(Submission { id, file })
    }

    /// 送信結果を反映。送信中のIDと一致しなければ無視してfalseを返す
    pub fn finish_submit(&mut self, id: SubmissionId, outcome: Result<Prediction>) -> bool {
        if self.in_flight != Some(id) {
            log::debug!("result for unknown submission {:?} ignored", id);
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(prediction) => {
                log::info!(
                    "prediction: {} ({})",
                    prediction.label,
                    prediction.confidence_percent()
                );
                self.result = Some(prediction);
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                if e.is_decode() {
                    log::warn!("unexpected response: {}", e);
                } else if e.is_transport() {
                    log::warn!("upload failed: {}", e);
                } else {
                    log::error!("submission error: {}", e);
                }
                self.notice = Some(Notice::UploadFailed);
                self.phase = if self.file.is_some() {
                    Phase::Failed
                } else {
                    Phase::Idle
                };
            }
        }
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// ドロップ。ファイルがなければドラッグ表示を戻すだけ
    pub fn drop_file(&mut self, file: Option<F>) -> Option<PreviewTicket> {
        self.dragging = false;
        file.and_then(|f| self.select_file(f))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn result(&self) -> Option<&Prediction> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// 結果のラベルでアドバイス表を引く
    pub fn advisory<'t>(&self, table: &'t AdvisoryTable) -> Option<&'t Advisory> {
        self.result
            .as_ref()
            .and_then(|prediction| table.lookup(&prediction.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Crop;

    fn leaf() -> SelectedFile {
        SelectedFile::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn notes() -> SelectedFile {
        SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec())
    }

    #[test]
    fn test_initial_state() {
        let form = UploadForm::<SelectedFile>::new();
        assert_eq!(form.phase(), Phase::Idle);
        assert!(form.file().is_none());
        assert!(!form.is_dragging());
        assert!(form.notice().is_none());
    }

    #[test]
    fn test_submit_without_file() {
        let mut form = UploadForm::<SelectedFile>::new();
        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, Error::NoFileSelected));
        assert_eq!(form.notice(), Some(Notice::SelectFileFirst));
        assert_eq!(form.phase(), Phase::Idle);
        assert!(!form.is_busy());
    }

    #[test]
    fn test_select_image_issues_preview_ticket() {
        let mut form = UploadForm::new();
        let ticket = form.select_file(leaf()).expect("image should get a preview");
        assert_eq!(form.phase(), Phase::FileSelected);
        assert!(form.preview().is_none());

        let data_url = preview::data_url("image/jpeg", &leaf().bytes);
        assert!(form.apply_preview(ticket, data_url.clone()));
        assert_eq!(form.preview(), Some(data_url.as_str()));
    }

    #[test]
    fn test_non_image_clears_preview() {
        let mut form = UploadForm::new();
        let ticket = form.select_file(leaf()).unwrap();
        form.apply_preview(ticket, "data:image/jpeg;base64,/9j/".into());

        assert!(form.select_file(notes()).is_none());
        assert!(form.preview().is_none());
        assert_eq!(form.file().unwrap().name, "notes.txt");
    }

    #[test]
    fn test_stale_preview_discarded() {
        let mut form = UploadForm::new();
        let first = form.select_file(leaf()).unwrap();
        let second = form.select_file(leaf()).unwrap();

        assert!(!form.apply_preview(first, "data:old".into()));
        assert!(form.preview().is_none());
        assert!(form.apply_preview(second, "data:new".into()));
        assert_eq!(form.preview(), Some("data:new"));
    }

    #[test]
    fn test_successful_submission() {
        let mut form = UploadForm::new();
        form.select_file(leaf());

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.file.name, "leaf.jpg");
        assert_eq!(form.phase(), Phase::Submitting);
        assert!(form.is_busy());

        assert!(form.finish_submit(submission.id, Ok(Prediction::new("Healthy", 0.97))));
        assert_eq!(form.phase(), Phase::Succeeded);
        let result = form.result().unwrap();
        assert_eq!(result.label, "Healthy");
        assert_eq!(result.confidence_percent(), "97.00%");
        assert!(form.notice().is_none());
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut form = UploadForm::new();
        form.select_file(leaf());

        let first = form.begin_submit().unwrap();
        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, Error::SubmitInFlight));
        assert_eq!(form.phase(), Phase::Submitting);

        assert!(form.finish_submit(first.id, Ok(Prediction::new("Leaf Mold", 0.6))));
        assert!(!form.is_busy());
    }

    #[test]
    fn test_failure_retains_file_and_allows_retry() {
        let mut form = UploadForm::new();
        form.select_file(leaf());

        let submission = form.begin_submit().unwrap();
        form.finish_submit(submission.id, Err(Error::Transport("connection refused".into())));

        assert_eq!(form.phase(), Phase::Failed);
        assert_eq!(form.notice(), Some(Notice::UploadFailed));
        assert_eq!(form.notice().unwrap().message(), "File upload failed.");
        assert!(form.file().is_some());
        assert!(form.result().is_none());

        let retry = form.begin_submit().unwrap();
        assert!(form.notice().is_none());
        form.finish_submit(retry.id, Ok(Prediction::new("Target Spot", 0.4)));
        assert_eq!(form.phase(), Phase::Succeeded);
    }

    #[test]
    fn test_decode_error_becomes_upload_failed() {
        let mut form = UploadForm::new();
        form.select_file(leaf());
        let submission = form.begin_submit().unwrap();

        let outcome = crate::response::parse_predict_response(
            r#"{"class": "Leaf Mold", "confidence": 0.5, "image": "abc"}"#,
        );
        form.finish_submit(submission.id, outcome);
        assert_eq!(form.phase(), Phase::Failed);
        assert_eq!(form.notice(), Some(Notice::UploadFailed));
    }

    #[test]
    fn test_unknown_submission_ignored() {
        let mut form = UploadForm::new();
        form.select_file(leaf());
        let submission = form.begin_submit().unwrap();
        form.finish_submit(submission.id, Ok(Prediction::new("Healthy", 0.9)));

        // 同じIDを二度反映しない
        assert!(!form.finish_submit(submission.id, Err(Error::Status(500))));
        assert_eq!(form.phase(), Phase::Succeeded);
    }

    #[test]
    fn test_select_during_submit_keeps_submitting() {
        let mut form = UploadForm::new();
        form.select_file(leaf());
        let submission = form.begin_submit().unwrap();

        form.select_file(notes());
        assert_eq!(form.phase(), Phase::Submitting);
        assert!(form.is_busy());

        form.finish_submit(submission.id, Ok(Prediction::new("Healthy", 0.9)));
        assert_eq!(form.phase(), Phase::Succeeded);
    }

    #[test]
    fn test_new_file_clears_previous_result() {
        let mut form = UploadForm::new();
        form.select_file(leaf());
        let submission = form.begin_submit().unwrap();
        form.finish_submit(submission.id, Ok(Prediction::new("Healthy", 0.9)));

        form.select_file(leaf());
        assert!(form.result().is_none());
        assert_eq!(form.phase(), Phase::FileSelected);
    }

    #[test]
    fn test_drag_enter_then_leave() {
        let mut form = UploadForm::new();
        form.select_file(leaf());

        form.drag_enter();
        form.drag_over();
        assert!(form.is_dragging());
        form.drag_leave();

        assert!(!form.is_dragging());
        assert_eq!(form.file().unwrap().name, "leaf.jpg");
        assert_eq!(form.phase(), Phase::FileSelected);
    }

    #[test]
    fn test_drop_selects_file() {
        let mut form = UploadForm::new();
        form.drag_enter();
        let ticket = form.drop_file(Some(leaf()));

        assert!(ticket.is_some());
        assert!(!form.is_dragging());
        assert_eq!(form.phase(), Phase::FileSelected);
    }

    #[test]
    fn test_drop_without_file() {
        let mut form = UploadForm::<SelectedFile>::new();
        form.drag_over();
        assert!(form.drop_file(None).is_none());
        assert!(!form.is_dragging());
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_advisory_lookup() {
        let table = AdvisoryTable::builtin(Crop::Tomato);
        let mut form = UploadForm::new();
        form.select_file(leaf());

        let submission = form.begin_submit().unwrap();
        form.finish_submit(submission.id, Ok(Prediction::new("Late Blight", 0.88)));
        assert!(form.advisory(table).unwrap().treatment.contains("fungicides"));

        form.select_file(leaf());
        let submission = form.begin_submit().unwrap();
        form.finish_submit(submission.id, Ok(Prediction::new("Unknown Disease", 0.3)));
        assert_eq!(form.phase(), Phase::Succeeded);
        assert!(form.advisory(table).is_none());
        assert_eq!(form.result().unwrap().confidence_percent(), "30.00%");
    }

    #[test]
    fn test_selected_file_from_bytes() {
        let file = SelectedFile::from_bytes("leaf.PNG", vec![1, 2, 3]);
        assert_eq!(file.media_type, "image/png");
        assert!(file.is_image());
        assert!(!SelectedFile::from_bytes("data.bin", vec![]).is_image());
    }
}
