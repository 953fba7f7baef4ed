//! プレビュー用ユーティリティ
//!
//! Data URLの生成とMIMEタイプ判定

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 画像として扱う拡張子とMIMEタイプ
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

/// 不明な拡張子のMIMEタイプ
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// "image/" で始まるか
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// バイト列からData URLを生成
///
/// # Arguments
/// * `media_type` - 例: "image/jpeg"
/// * `bytes` - 生データ
///
/// # Returns
/// "data:image/jpeg;base64,..." 形式の文字列
pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// ファイル名の拡張子からMIMEタイプを推定（大文字小文字は無視）
pub fn media_type_from_file_name(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return FALLBACK_MEDIA_TYPE,
    };
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media)| *media)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/jpeg"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(data_url("image/png", b""), "data:image/png;base64,");
    }

    #[test]
    fn test_media_type_from_file_name() {
        assert_eq!(media_type_from_file_name("leaf.jpg"), "image/jpeg");
        assert_eq!(media_type_from_file_name("LEAF.JPEG"), "image/jpeg");
        assert_eq!(media_type_from_file_name("scan.Png"), "image/png");
        assert_eq!(media_type_from_file_name("notes.txt"), FALLBACK_MEDIA_TYPE);
        assert_eq!(media_type_from_file_name("README"), FALLBACK_MEDIA_TYPE);
    }
}
