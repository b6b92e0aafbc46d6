use super::duration_filter::{ScanReport, find_long_videos};
use crate::config::{Settings, VideoExtensions};
use crate::tools::{
    create_progress_bar, ensure_tool_available, get_video_info, scan_video_files,
    validate_directory_exists,
};
use anyhow::{Result, bail};
use console::style;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 長度掃描的執行參數
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub input_dir: PathBuf,
    pub duration_threshold: f64,
    pub extensions: VideoExtensions,
    pub ffprobe: String,
}

impl ScanOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let Some(input_dir) = settings.scanner.input_dir.clone() else {
            bail!("未設定掃描資料夾");
        };

        let options = Self {
            input_dir,
            duration_threshold: settings.scanner.duration_threshold,
            extensions: settings.video_extensions.clone(),
            ffprobe: settings.tools.ffprobe.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_directory_exists(&self.input_dir)?;
        if self.duration_threshold.is_nan() || self.duration_threshold <= 0.0 {
            bail!("長度門檻必須大於 0: {}", self.duration_threshold);
        }
        if self.extensions.is_empty() {
            bail!("影片副檔名清單不可為空");
        }
        Ok(())
    }
}

pub struct DurationScanner {
    options: ScanOptions,
    shutdown_signal: Arc<AtomicBool>,
}

impl DurationScanner {
    pub const fn new(options: ScanOptions, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<ScanReport> {
        println!("{}", style("=== 影片長度掃描 ===").cyan().bold());

        ensure_tool_available(&self.options.ffprobe)?;

        println!(
            "{}",
            style(format!("掃描影片中: {}", self.options.input_dir.display())).dim()
        );
        let paths: Vec<PathBuf> =
            scan_video_files(&self.options.input_dir, &self.options.extensions)
                .into_iter()
                .map(|file| file.path)
                .collect();

        if paths.is_empty() {
            println!("{}", style("找不到任何影片檔案").yellow());
            info!("長度掃描結束：沒有影片");
            return Ok(ScanReport::default());
        }

        println!(
            "{}",
            style(format!("檢查 {} 個影片的長度...", paths.len())).green()
        );

        let progress_bar = create_progress_bar(paths.len(), "取得影片長度中...");
        let ffprobe = self.options.ffprobe.as_str();
        let report = find_long_videos(
            &paths,
            self.options.duration_threshold,
            |path| get_video_info(ffprobe, path).map(|info| info.duration_seconds()),
            &self.shutdown_signal,
            &progress_bar,
        );
        if report.interrupted {
            progress_bar.abandon_with_message("操作已中斷");
        } else {
            progress_bar.finish_with_message("完成");
        }

        self.print_summary(&report);
        Ok(report)
    }

    fn print_summary(&self, report: &ScanReport) {
        let threshold = self.options.duration_threshold;

        println!();
        println!("{}", style("=== 掃描完成 ===").cyan().bold());
        println!("  已掃描: {} 個檔案", report.scanned);
        if report.unreadable > 0 {
            println!("  無法讀取: {} 個", style(report.unreadable).red());
        }

        if report.long_videos.is_empty() {
            println!(
                "{}",
                style(format!("沒有超過 {threshold} 秒的影片")).green()
            );
        } else {
            println!(
                "{}",
                style(format!(
                    "找到 {} 個超過 {threshold} 秒的影片：",
                    report.long_videos.len()
                ))
                .yellow()
            );
            for video in &report.long_videos {
                println!(
                    "  - {} ({:.2}s)",
                    video.path.display(),
                    video.duration_seconds
                );
            }
        }

        info!(
            "長度掃描完成 - 掃描: {}, 無法讀取: {}, 超過門檻: {}",
            report.scanned,
            report.unreadable,
            report.long_videos.len()
        );
    }
}
