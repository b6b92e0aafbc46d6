//! 影片長度掃描元件
//!
//! 以 ffprobe 取得幀數與幀率，列出長度超過門檻的影片

mod duration_filter;
mod main;

pub use duration_filter::{LongVideo, ScanReport, find_long_videos};
pub use main::{DurationScanner, ScanOptions};
