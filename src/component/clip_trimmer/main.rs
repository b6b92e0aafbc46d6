use super::ffmpeg_command::TrimCommand;
use crate::config::{Settings, VideoExtensions};
use crate::tools::{
    TranscodeOutcome, create_progress_bar, ensure_directory_exists, resolve_path, run_transcoder,
    scan_video_files_flat, validate_directory_exists,
};
use anyhow::{Result, bail};
use console::style;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 片段擷取的執行參數
#[derive(Debug, Clone)]
pub struct TrimOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// 秒
    pub clip_duration: u32,
    pub extensions: VideoExtensions,
    pub ffmpeg: String,
}

impl TrimOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let trimmer = &settings.trimmer;
        let Some(input_dir) = trimmer.input_dir.clone() else {
            bail!("未設定輸入資料夾");
        };
        let Some(output_dir) = trimmer.output_dir.clone() else {
            bail!("未設定輸出資料夾");
        };

        let options = Self {
            input_dir,
            output_dir,
            clip_duration: trimmer.clip_duration,
            extensions: settings.video_extensions.clone(),
            ffmpeg: settings.tools.ffmpeg.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_directory_exists(&self.input_dir)?;
        if resolve_path(&self.input_dir)? == resolve_path(&self.output_dir)? {
            bail!("輸出資料夾不可與輸入資料夾相同: {}", self.input_dir.display());
        }
        if self.clip_duration == 0 {
            bail!("片段長度必須大於 0");
        }
        if self.extensions.is_empty() {
            bail!("影片副檔名清單不可為空");
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TrimReport {
    pub succeeded: usize,
    pub failed: Vec<PathBuf>,
    pub interrupted: bool,
}

pub struct ClipTrimmer {
    options: TrimOptions,
    shutdown_signal: Arc<AtomicBool>,
}

impl ClipTrimmer {
    pub const fn new(options: TrimOptions, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            shutdown_signal,
        }
    }

    /// 依序處理每個檔案；單檔失敗繼續下一個，找不到 ffmpeg 則整個中止
    pub fn run(&self) -> Result<TrimReport> {
        println!("{}", style("=== 影片片段擷取 ===").cyan().bold());

        if !self.options.output_dir.exists() {
            ensure_directory_exists(&self.options.output_dir)?;
            println!(
                "{}",
                style(format!("已建立資料夾: {}", self.options.output_dir.display())).dim()
            );
        }

        let video_files = scan_video_files_flat(&self.options.input_dir, &self.options.extensions);

        if video_files.is_empty() {
            println!(
                "{}",
                style(format!(
                    "找不到任何影片檔案，請確認路徑: {}",
                    self.options.input_dir.display()
                ))
                .yellow()
            );
            info!("片段擷取結束：沒有影片");
            return Ok(TrimReport::default());
        }

        println!(
            "{}",
            style(format!("找到 {} 個影片，開始擷取...", video_files.len())).green()
        );

        let mut report = TrimReport::default();
        let progress_bar = create_progress_bar(video_files.len(), "擷取片段中...");

        for file in &video_files {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷信號，停止擷取");
                progress_bar.abandon_with_message("操作已中斷");
                report.interrupted = true;
                break;
            }

            let trim = TrimCommand::new(&file.path, &self.options.output_dir, self.options.clip_duration);
            info!(
                "擷取 {} 的前 {} 秒 -> {}",
                file.path.display(),
                self.options.clip_duration,
                trim.destination_path().display()
            );

            match run_transcoder(trim.build_command(&self.options.ffmpeg)) {
                TranscodeOutcome::Success => report.succeeded += 1,
                TranscodeOutcome::ToolMissing => {
                    progress_bar.abandon_with_message("找不到 ffmpeg");
                    bail!(
                        "找不到 {}，請確認已安裝並加入 PATH",
                        self.options.ffmpeg
                    );
                }
                outcome => {
                    error!("擷取失敗 {}: {outcome}", file.path.display());
                    report.failed.push(file.path.clone());
                }
            }
            progress_bar.inc(1);
        }

        if !report.interrupted {
            progress_bar.finish_with_message("完成");
        }
        self.print_summary(&report);

        Ok(report)
    }

    fn print_summary(&self, report: &TrimReport) {
        println!();
        println!("{}", style("=== 片段擷取完成 ===").cyan().bold());
        println!("  成功: {} 個", style(report.succeeded).green());
        if !report.failed.is_empty() {
            println!("  失敗: {} 個", style(report.failed.len()).red());
            for path in &report.failed {
                println!("    - {}", path.display());
            }
        }
        println!("  輸出資料夾: {}", self.options.output_dir.display());

        info!(
            "片段擷取完成 - 成功: {}, 失敗: {}",
            report.succeeded,
            report.failed.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_options_reject_zero_duration() {
        let input = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.trimmer.input_dir = Some(input.path().to_path_buf());
        settings.trimmer.output_dir = Some(input.path().join("out"));
        settings.trimmer.clip_duration = 0;
        assert!(TrimOptions::from_settings(&settings).is_err());

        settings.trimmer.clip_duration = 4;
        assert!(TrimOptions::from_settings(&settings).is_ok());
    }

    #[test]
    fn test_options_reject_missing_input() {
        let input = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.trimmer.input_dir = Some(input.path().join("missing"));
        settings.trimmer.output_dir = Some(input.path().join("out"));
        assert!(TrimOptions::from_settings(&settings).is_err());
    }

    #[test]
    fn test_options_reject_aliases_of_input() {
        let work = TempDir::new().unwrap();
        let input = work.path().join("clips");
        std::fs::create_dir_all(input.join("sub")).unwrap();
        let mut settings = Settings::default();
        settings.trimmer.input_dir = Some(input.clone());

        let mut aliases = vec![input.join("."), input.join("sub/.."), work.path().join("./clips")];
        #[cfg(unix)]
        {
            let link = work.path().join("clips_link");
            std::os::unix::fs::symlink(&input, &link).unwrap();
            aliases.push(link);
        }

        for alias in aliases {
            settings.trimmer.output_dir = Some(alias.clone());
            assert!(TrimOptions::from_settings(&settings).is_err(), "{alias:?}");
        }

        settings.trimmer.output_dir = Some(work.path().join("trimmed"));
        assert!(TrimOptions::from_settings(&settings).is_ok());
    }
}
