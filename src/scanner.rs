use crate::error::{LeafDoctorError, Result};
use leaf_doctor_common::{preview, SelectedFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

impl ImageInfo {
    fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }

    /// ファイルを読み込んでフォームに渡せる形にする
    pub fn load(&self) -> Result<SelectedFile> {
        let bytes = std::fs::read(&self.path)?;
        Ok(SelectedFile::from_bytes(self.file_name.clone(), bytes))
    }
}

fn is_image_file(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    preview::is_image_media_type(preview::media_type_from_file_name(&name))
}

/// 画像ファイルまたはフォルダを診断対象に展開する
///
/// ファイルは拡張子を問わずそのまま対象にする（サーバ側で判定）。
/// フォルダは直下の画像のみ、ファイル名順。
pub fn collect_targets(target: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !target.exists() {
        return Err(LeafDoctorError::FileNotFound(target.display().to_string()));
    }
    if target.is_file() {
        return Ok(vec![ImageInfo::from_path(target)]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageInfo> = WalkDir::new(target)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_file(e.path()))
        .map(|e| ImageInfo::from_path(e.path()))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(images)
}
