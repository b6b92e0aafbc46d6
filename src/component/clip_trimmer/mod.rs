//! 影片片段擷取元件
//!
//! 逐一呼叫 ffmpeg，從每個影片開頭擷取固定秒數

mod ffmpeg_command;
mod main;

pub use ffmpeg_command::TrimCommand;
pub use main::{ClipTrimmer, TrimOptions, TrimReport};
