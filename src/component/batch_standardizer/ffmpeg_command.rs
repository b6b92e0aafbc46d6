use std::path::{Path, PathBuf};
use std::process::Command;

pub const TARGET_FPS: u32 = 30;
pub const TARGET_HEIGHT: u32 = 480;
pub const VIDEO_CODEC: &str = "libx264";
pub const OUTPUT_EXTENSION: &str = "mp4";

/// 標準化轉檔指令：固定幀率、高度 480、寬度取偶數、H.264、移除音訊
pub struct StandardizeCommand {
    source_path: PathBuf,
    destination_path: PathBuf,
}

impl StandardizeCommand {
    #[must_use]
    pub fn new(source_path: &Path, output_root: &Path, class_label: &str) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: Self::generate_destination_path(source_path, output_root, class_label),
        }
    }

    /// `output_root/<class_label>/<stem>.mp4`
    #[must_use]
    pub fn generate_destination_path(
        source_path: &Path,
        output_root: &Path,
        class_label: &str,
    ) -> PathBuf {
        let file_stem = source_path
            .file_stem()
            .map_or_else(|| "output".into(), |s| s.to_string_lossy());
        output_root
            .join(class_label)
            .join(format!("{file_stem}.{OUTPUT_EXTENSION}"))
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub fn video_filter() -> String {
        format!("fps={TARGET_FPS},scale='trunc(oh*a/2)*2':{TARGET_HEIGHT}")
    }

    #[must_use]
    pub fn build_command(&self, ffmpeg: &str) -> Command {
        let mut cmd = Command::new(ffmpeg);

        cmd.arg("-i").arg(&self.source_path);
        cmd.args([
            "-vf", &Self::video_filter(),
            "-c:v", VIDEO_CODEC,
            "-an",
            "-y",
            "-loglevel", "error",
        ]);
        cmd.arg(&self.destination_path);

        cmd
    }
}
