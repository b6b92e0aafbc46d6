//! 功能元件模組
//!
//! 三個互相獨立的資料集前處理工具

pub mod batch_standardizer;
pub mod clip_trimmer;
pub mod duration_scanner;

pub use batch_standardizer::BatchStandardizer;
pub use clip_trimmer::ClipTrimmer;
pub use duration_scanner::DurationScanner;
