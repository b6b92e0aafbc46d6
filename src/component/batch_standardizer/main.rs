use super::worker_pool::{ConversionSummary, ConversionTask, WorkerPool};
use crate::config::{Settings, VideoExtensions};
use crate::tools::{
    create_progress_bar, ensure_directory_exists, ensure_tool_available, is_same_or_nested,
    scan_video_files, validate_directory_exists,
};
use anyhow::{Result, bail};
use console::style;
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;

/// 批次標準化的執行參數
#[derive(Debug, Clone)]
pub struct StandardizeOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub worker_count: usize,
    pub extensions: VideoExtensions,
    pub ffmpeg: String,
}

impl StandardizeOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let standardizer = &settings.standardizer;
        let Some(input_dir) = standardizer.input_dir.clone() else {
            bail!("未設定輸入資料夾");
        };
        let Some(output_dir) = standardizer.output_dir.clone() else {
            bail!("未設定輸出資料夾");
        };

        let options = Self {
            input_dir,
            output_dir,
            worker_count: standardizer
                .worker_count
                .unwrap_or_else(default_worker_count),
            extensions: settings.video_extensions.clone(),
            ffmpeg: settings.tools.ffmpeg.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_directory_exists(&self.input_dir)?;
        // 重跑時的輸入掃描不可包含上次的輸出
        if is_same_or_nested(&self.input_dir, &self.output_dir)? {
            bail!(
                "輸出資料夾不可位於輸入資料夾內: {}",
                self.output_dir.display()
            );
        }
        if self.worker_count == 0 {
            bail!("worker 數量至少為 1");
        }
        if self.extensions.is_empty() {
            bail!("影片副檔名清單不可為空");
        }
        Ok(())
    }
}

#[must_use]
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

pub struct BatchStandardizer {
    options: StandardizeOptions,
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchStandardizer {
    pub const fn new(options: StandardizeOptions, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            shutdown_signal,
        }
    }

    /// 建立任務列表，依類別標籤分組輸出
    #[must_use]
    pub fn create_tasks(&self) -> Vec<ConversionTask> {
        scan_video_files(&self.options.input_dir, &self.options.extensions)
            .into_iter()
            .map(|file| ConversionTask::new(file, &self.options.output_dir))
            .collect()
    }

    pub fn run(&self) -> Result<ConversionSummary> {
        println!("{}", style("=== 影片批次標準化 ===").cyan().bold());

        ensure_tool_available(&self.options.ffmpeg)?;
        ensure_directory_exists(&self.options.output_dir)?;

        println!("{}", style("掃描要標準化的影片檔案中...").dim());
        let tasks = self.create_tasks();

        if tasks.is_empty() {
            println!(
                "{}",
                style(format!(
                    "找不到任何影片檔案，請確認輸入路徑: {}",
                    self.options.input_dir.display()
                ))
                .yellow()
            );
            info!("標準化結束：沒有影片");
            return Ok(ConversionSummary::default());
        }

        warn_output_collisions(&tasks);

        let class_labels: BTreeSet<&str> = tasks.iter().map(|t| t.class_label.as_str()).collect();
        for label in &class_labels {
            ensure_directory_exists(&self.options.output_dir.join(label))?;
        }

        println!(
            "{}",
            style(format!(
                "找到 {} 個影片（{} 個類別），開始轉檔...",
                tasks.len(),
                class_labels.len()
            ))
            .green()
        );

        let progress_bar = create_progress_bar(tasks.len(), "標準化影片中...");
        let pool = WorkerPool::new(
            self.options.worker_count,
            &self.options.ffmpeg,
            Arc::clone(&self.shutdown_signal),
        );
        let summary = pool.run(tasks, &progress_bar)?;

        if summary.skipped > 0 {
            progress_bar.abandon_with_message("操作已中斷");
        } else {
            progress_bar.finish_with_message("完成");
        }

        self.print_summary(&summary);

        if summary.tool_missing {
            bail!("找不到 {}，請確認已安裝並加入 PATH", self.options.ffmpeg);
        }

        Ok(summary)
    }

    fn print_summary(&self, summary: &ConversionSummary) {
        println!();
        println!("{}", style("=== 標準化完成 ===").cyan().bold());
        println!("  成功: {} 個", style(summary.succeeded).green());
        println!("  失敗: {} 個", style(summary.failed).red());
        if summary.skipped > 0 {
            println!("  略過: {} 個", style(summary.skipped).yellow());
        }
        println!("  輸出資料夾: {}", self.options.output_dir.display());

        info!(
            "標準化完成 - 成功: {}, 失敗: {}, 略過: {}",
            summary.succeeded, summary.failed, summary.skipped
        );
    }
}

/// 同類別下主檔名相同的輸入會寫到同一個輸出檔
fn warn_output_collisions(tasks: &[ConversionTask]) {
    let mut seen: HashMap<PathBuf, &PathBuf> = HashMap::new();
    for task in tasks {
        if let Some(previous) = seen.insert(task.output_path(), &task.source.path) {
            warn!(
                "輸出檔名衝突，{} 會覆蓋 {} 的結果: {}",
                task.source.path.display(),
                previous.display(),
                task.output_path().display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(input: &TempDir, output: &TempDir) -> StandardizeOptions {
        StandardizeOptions {
            input_dir: input.path().to_path_buf(),
            output_dir: output.path().join("standardized"),
            worker_count: 2,
            extensions: VideoExtensions::default(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }

    #[test]
    fn test_create_tasks_groups_by_label() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("punch")).unwrap();
        fs::create_dir_all(input.path().join("kick")).unwrap();
        fs::write(input.path().join("punch/a.mov"), b"x").unwrap();
        fs::write(input.path().join("kick/b.avi"), b"x").unwrap();

        let standardizer = BatchStandardizer::new(options(&input, &output), Arc::default());
        let tasks = standardizer.create_tasks();

        let out_root = output.path().join("standardized");
        let pairs: Vec<_> = tasks
            .iter()
            .map(|t| (t.class_label.clone(), t.output_path()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("kick".to_string(), out_root.join("kick/b.mp4")),
                ("punch".to_string(), out_root.join("punch/a.mp4")),
            ]
        );
    }

    #[test]
    fn test_options_reject_zero_workers() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.standardizer.input_dir = Some(input.path().to_path_buf());
        settings.standardizer.output_dir = Some(output.path().join("out"));
        settings.standardizer.worker_count = Some(0);
        assert!(StandardizeOptions::from_settings(&settings).is_err());

        settings.standardizer.worker_count = None;
        let options = StandardizeOptions::from_settings(&settings).unwrap();
        assert!(options.worker_count >= 1);
    }

    #[test]
    fn test_options_require_output_dir() {
        let input = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.standardizer.input_dir = Some(input.path().to_path_buf());
        assert!(StandardizeOptions::from_settings(&settings).is_err());
    }

    #[test]
    fn test_options_reject_output_inside_input() {
        let input = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("punch")).unwrap();
        let mut settings = Settings::default();
        settings.standardizer.input_dir = Some(input.path().to_path_buf());

        for output in [
            input.path().join("out"),
            input.path().join("punch/standardized"),
            input.path().to_path_buf(),
        ] {
            settings.standardizer.output_dir = Some(output.clone());
            let err = StandardizeOptions::from_settings(&settings).unwrap_err();
            assert!(err.to_string().contains("輸出資料夾不可位於輸入資料夾內"), "{output:?}");
        }
    }
}
