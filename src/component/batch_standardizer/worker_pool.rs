use super::ffmpeg_command::StandardizeCommand;
use crate::tools::{TranscodeOutcome, VideoFile, run_transcoder};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

/// 單一轉檔任務，由一個 worker 消耗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub source: VideoFile,
    pub output_root: PathBuf,
    pub class_label: String,
}

impl ConversionTask {
    #[must_use]
    pub fn new(source: VideoFile, output_root: &Path) -> Self {
        let class_label = source.class_label.clone();
        Self {
            source,
            output_root: output_root.to_path_buf(),
            class_label,
        }
    }

    #[must_use]
    pub fn command(&self) -> StandardizeCommand {
        StandardizeCommand::new(&self.source.path, &self.output_root, &self.class_label)
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.command().destination_path().to_path_buf()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub outcome: TranscodeOutcome,
}

/// 轉檔統計，只由接收結果的執行緒更新
#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub tool_missing: bool,
    pub results: Vec<ConversionResult>,
}

impl ConversionSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    fn record(&mut self, result: ConversionResult) {
        match &result.outcome {
            TranscodeOutcome::Success => self.succeeded += 1,
            TranscodeOutcome::Skipped => self.skipped += 1,
            TranscodeOutcome::ToolMissing => {
                self.tool_missing = true;
                self.failed += 1;
            }
            TranscodeOutcome::ToolFailure { .. } | TranscodeOutcome::LaunchFailed(_) => {
                self.failed += 1;
            }
        }
        self.results.push(result);
    }
}

/// 固定大小的轉檔工作池
///
/// 所有任務先全部送出；worker 透過 channel 回傳結果，
/// 計數與進度只在呼叫端執行緒更新，完成順序不保證與送出順序相同。
/// 任何任務回報找不到 ffmpeg 時，尚未開始的任務一律略過。
pub struct WorkerPool {
    worker_count: usize,
    ffmpeg: String,
    shutdown_signal: Arc<AtomicBool>,
}

impl WorkerPool {
    #[must_use]
    pub fn new(worker_count: usize, ffmpeg: &str, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            worker_count: worker_count.max(1),
            ffmpeg: ffmpeg.to_string(),
            shutdown_signal,
        }
    }

    pub fn run(
        &self,
        tasks: Vec<ConversionTask>,
        progress_bar: &ProgressBar,
    ) -> Result<ConversionSummary> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|index| format!("standardize-{index}"))
            .build()
            .context("無法建立轉檔工作池")?;

        info!(
            "開始轉檔，共 {} 個檔案，{} 個 worker",
            tasks.len(),
            self.worker_count
        );

        let abort = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::channel::<ConversionResult>();

        for task in tasks {
            let sender = sender.clone();
            let ffmpeg = self.ffmpeg.clone();
            let shutdown_signal = Arc::clone(&self.shutdown_signal);
            let abort = Arc::clone(&abort);

            pool.spawn(move || {
                let result = convert(&task, &ffmpeg, &shutdown_signal, &abort);
                // 接收端只會在所有 sender 結束後才停止
                let _ = sender.send(result);
            });
        }
        drop(sender);

        let mut summary = ConversionSummary::default();
        for result in receiver {
            match &result.outcome {
                TranscodeOutcome::Success => {
                    info!("轉檔完成: {}", result.output_path.display());
                }
                TranscodeOutcome::Skipped => {}
                outcome => {
                    error!("轉檔失敗 {}: {outcome}", result.source_path.display());
                }
            }

            summary.record(result);
            progress_bar.inc(1);
        }

        Ok(summary)
    }
}

fn convert(
    task: &ConversionTask,
    ffmpeg: &str,
    shutdown_signal: &AtomicBool,
    abort: &AtomicBool,
) -> ConversionResult {
    let command = task.command();
    let output_path = command.destination_path().to_path_buf();

    let outcome = if shutdown_signal.load(Ordering::SeqCst) || abort.load(Ordering::SeqCst) {
        TranscodeOutcome::Skipped
    } else {
        let outcome = run_transcoder(command.build_command(ffmpeg));
        if outcome == TranscodeOutcome::ToolMissing && !abort.swap(true, Ordering::SeqCst) {
            warn!("找不到 {ffmpeg}，略過其餘轉檔任務");
        }
        outcome
    };

    ConversionResult {
        source_path: task.source.path.clone(),
        output_path,
        outcome,
    }
}
