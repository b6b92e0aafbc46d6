mod ffprobe_info;
mod path_validator;
mod progress;
mod transcoder;
mod video_scanner;

pub use ffprobe_info::{VideoInfo, compute_duration, get_video_info};
pub use path_validator::{
    ensure_directory_exists, is_same_or_nested, resolve_path, validate_directory_exists,
};
pub use progress::create_progress_bar;
pub use transcoder::{TranscodeOutcome, ensure_tool_available, run_transcoder};
pub use video_scanner::{VideoFile, class_label_for, scan_video_files, scan_video_files_flat};
