use crate::config::{DEFAULT_CLASS_LABEL, VideoExtensions};
use log::warn;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// 掃描到的影片檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
    /// 相對於掃描根目錄的第一層資料夾名稱
    pub class_label: String,
    /// 小寫副檔名（不含點）
    pub extension: String,
}

impl VideoFile {
    fn from_path(root: &Path, path: PathBuf) -> Self {
        let class_label = class_label_for(root, &path);
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self {
            path,
            class_label,
            extension,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// 取得類別標籤：檔案位置相對於 `root` 的第一段路徑，直接位於 `root` 下則為 `default`
#[must_use]
pub fn class_label_for(root: &Path, path: &Path) -> String {
    let Some(parent) = path.parent() else {
        return DEFAULT_CLASS_LABEL.to_string();
    };

    parent
        .strip_prefix(root)
        .ok()
        .and_then(|relative| {
            relative.components().find_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
        })
        .unwrap_or_else(|| DEFAULT_CLASS_LABEL.to_string())
}

/// 遞迴掃描影片檔案，依路徑排序
pub fn scan_video_files(root: &Path, extensions: &VideoExtensions) -> Vec<VideoFile> {
    collect_video_files(root, extensions, None)
}

/// 只掃描 `directory` 本身（不進入子資料夾）
pub fn scan_video_files_flat(directory: &Path, extensions: &VideoExtensions) -> Vec<VideoFile> {
    collect_video_files(directory, extensions, Some(1))
}

fn collect_video_files(
    root: &Path,
    extensions: &VideoExtensions,
    max_depth: Option<usize>,
) -> Vec<VideoFile> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut video_files: Vec<VideoFile> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("無法讀取路徑 {}: {e}", display_walk_error_path(&e));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| extensions.is_video_file(entry.path()))
        .map(|entry| VideoFile::from_path(root, entry.into_path()))
        .collect();

    video_files.sort_by(|a, b| a.path.cmp(&b.path));
    video_files
}

fn display_walk_error_path(error: &walkdir::Error) -> String {
    error
        .path()
        .map_or_else(|| "?".to_string(), |path| path.display().to_string())
}
