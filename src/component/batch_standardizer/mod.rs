//! 影片批次標準化元件
//!
//! 依第一層資料夾分類，平行呼叫 ffmpeg 轉為 30fps、480p、H.264、無音訊的 mp4

mod ffmpeg_command;
mod main;
mod worker_pool;

pub use ffmpeg_command::StandardizeCommand;
pub use main::{BatchStandardizer, StandardizeOptions, default_worker_count};
pub use worker_pool::{ConversionResult, ConversionSummary, ConversionTask, WorkerPool};
