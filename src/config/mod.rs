pub mod load;
pub mod save;
pub mod types;

pub use load::DEFAULT_SETTINGS_FILE;
pub use save::save_settings;
pub use types::{
    Config, DEFAULT_CLASS_LABEL, DEFAULT_CLIP_DURATION, DEFAULT_DURATION_THRESHOLD,
    DEFAULT_VIDEO_EXTENSIONS, ScannerSettings, Settings, StandardizerSettings, ToolSettings,
    TrimmerSettings, VideoExtensions,
};
