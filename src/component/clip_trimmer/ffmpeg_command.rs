use std::path::{Path, PathBuf};
use std::process::Command;

const START_OFFSET: &str = "00:00:00";

/// 從頭擷取固定秒數的片段，輸出檔名與來源相同
pub struct TrimCommand {
    source_path: PathBuf,
    destination_path: PathBuf,
    clip_duration: u32,
}

impl TrimCommand {
    #[must_use]
    pub fn new(source_path: &Path, output_dir: &Path, clip_duration: u32) -> Self {
        let file_name = source_path
            .file_name()
            .map_or_else(|| "output".into(), ToOwned::to_owned);
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: output_dir.join(file_name),
            clip_duration,
        }
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub fn build_command(&self, ffmpeg: &str) -> Command {
        let mut cmd = Command::new(ffmpeg);

        cmd.arg("-i").arg(&self.source_path);
        cmd.args(["-ss", START_OFFSET, "-t", &self.clip_duration.to_string()]);
        cmd.arg(&self.destination_path);
        cmd.arg("-y");

        cmd
    }
}
