//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use leaf_doctor::error::LeafDoctorError;
use leaf_doctor::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないパスを指定した場合
#[test]
fn test_collect_nonexistent_path() {
    let result = scanner::collect_targets(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(LeafDoctorError::FileNotFound(_))));
}

/// 空のフォルダを指定した場合
#[test]
fn test_collect_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::collect_targets(dir.path(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダを指定した場合
#[test]
fn test_collect_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    assert!(scanner::collect_targets(dir.path(), false).unwrap().is_empty());
}

/// LeafDoctorErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        LeafDoctorError::Config("テスト設定エラー".to_string()),
        LeafDoctorError::FileNotFound("leaf.jpg".to_string()),
        LeafDoctorError::NoImagesFound("/path/to/folder".to_string()),
        LeafDoctorError::ServiceDown(503),
        LeafDoctorError::Diagnosis(leaf_doctor_common::Error::NoFileSelected),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 共通エラーからの変換
#[test]
fn test_error_from_common() {
    let err: LeafDoctorError = leaf_doctor_common::Error::Status(502).into();
    assert!(matches!(err, LeafDoctorError::Diagnosis(_)));
    assert!(format!("{}", err).contains("502"));
}

/// IOエラーからの変換
#[test]
fn test_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: LeafDoctorError = io_error.into();

    assert!(matches!(err, LeafDoctorError::Io(_)));
    assert!(format!("{}", err).contains("IOエラー"));
}

/// JSONエラーからの変換
#[test]
fn test_error_from_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
    let err: LeafDoctorError = json_error.into();

    assert!(matches!(err, LeafDoctorError::JsonParse(_)));
}
