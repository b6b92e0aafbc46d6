use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DURATION_THRESHOLD: f64 = 3.0;
pub const DEFAULT_CLIP_DURATION: u32 = 4;
pub const DEFAULT_CLASS_LABEL: &str = "default";

/// 預設影片副檔名（不含點，比對時不分大小寫）
pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "avi", "mov", "mpg", "mpeg", "mkv", "wmv"];

/// 影片副檔名白名單，建立與反序列化時即正規化為小寫且不含點
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct VideoExtensions(Vec<String>);

impl From<Vec<String>> for VideoExtensions {
    fn from(extensions: Vec<String>) -> Self {
        Self::new(extensions)
    }
}

impl From<VideoExtensions> for Vec<String> {
    fn from(extensions: VideoExtensions) -> Self {
        extensions.0
    }
}

impl Default for VideoExtensions {
    fn default() -> Self {
        Self(
            DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        )
    }
}

impl VideoExtensions {
    /// 接受 `mp4`、`.MP4` 等寫法，統一為小寫且不含點
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.0.iter().any(|known| known.eq_ignore_ascii_case(ext)))
    }
}

/// 外部工具執行檔名稱
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    pub input_dir: Option<PathBuf>,
    /// 秒；只回報嚴格大於此值的影片
    pub duration_threshold: f64,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            input_dir: None,
            duration_threshold: DEFAULT_DURATION_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizerSettings {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// 未設定時使用 CPU 可用平行度
    pub worker_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimmerSettings {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// 秒
    pub clip_duration: u32,
}

impl Default for TrimmerSettings {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            clip_duration: DEFAULT_CLIP_DURATION,
        }
    }
}

/// 使用者設定（`settings.json`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub video_extensions: VideoExtensions,
    pub tools: ToolSettings,
    pub scanner: ScannerSettings,
    pub standardizer: StandardizerSettings,
    pub trimmer: TrimmerSettings,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    /// 設定檔位置，互動模式儲存時寫回這裡
    pub settings_path: PathBuf,
}
