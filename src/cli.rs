use crate::config::{Settings, VideoExtensions};
use clap::{Args, Parser, Subcommand, value_parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "video dataset preparation tools", long_about = None)]
pub struct Cli {
    /// 設定檔路徑，預設為工作目錄下的 settings.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// 未指定子指令時進入互動選單
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Scan(ScanArgs),
    Standardize(StandardizeArgs),
    Trim(TrimArgs),
}

#[derive(Args, Debug, Default)]
pub struct ExtensionArgs {
    #[arg(long, help = "video extension allowlist, comma separated", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,
}

#[derive(Args, Debug)]
#[command(about = "list videos longer than a duration threshold")]
pub struct ScanArgs {
    #[arg(short, long, long_help = "root folder to scan recursively")]
    pub input: Option<PathBuf>,
    #[arg(short, long, help = "duration threshold in seconds (exclusive)")]
    pub threshold: Option<f64>,
    #[arg(long, help = "ffprobe binary")]
    pub ffprobe: Option<String>,
    #[command(flatten)]
    pub filter: ExtensionArgs,
}

#[derive(Args, Debug)]
#[command(about = "batch transcode videos to 30fps 480p h264 without audio")]
pub struct StandardizeArgs {
    #[arg(short, long, long_help = "input root, first-level folders are class labels")]
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_parser = value_parser!(u32).range(1..), help = "worker count, defaults to cpu parallelism")]
    pub workers: Option<u32>,
    #[arg(long, help = "ffmpeg binary")]
    pub ffmpeg: Option<String>,
    #[command(flatten)]
    pub filter: ExtensionArgs,
}

#[derive(Args, Debug)]
#[command(about = "cut the first seconds of every video in a flat folder")]
pub struct TrimArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_parser = value_parser!(u32).range(1..), help = "clip duration in seconds")]
    pub duration: Option<u32>,
    #[arg(long, help = "ffmpeg binary")]
    pub ffmpeg: Option<String>,
    #[command(flatten)]
    pub filter: ExtensionArgs,
}

impl ExtensionArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(extensions) = &self.extensions {
            settings.video_extensions = VideoExtensions::new(extensions);
        }
    }
}

impl ScanArgs {
    /// 以命令列參數覆寫設定檔的值
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.scanner.input_dir = Some(input.clone());
        }
        if let Some(threshold) = self.threshold {
            settings.scanner.duration_threshold = threshold;
        }
        if let Some(ffprobe) = &self.ffprobe {
            settings.tools.ffprobe.clone_from(ffprobe);
        }
        self.filter.apply(settings);
    }
}

impl StandardizeArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.standardizer.input_dir = Some(input.clone());
        }
        if let Some(output) = &self.output {
            settings.standardizer.output_dir = Some(output.clone());
        }
        if let Some(workers) = self.workers {
            settings.standardizer.worker_count = Some(workers as usize);
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.tools.ffmpeg.clone_from(ffmpeg);
        }
        self.filter.apply(settings);
    }
}

impl TrimArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.trimmer.input_dir = Some(input.clone());
        }
        if let Some(output) = &self.output {
            settings.trimmer.output_dir = Some(output.clone());
        }
        if let Some(duration) = self.duration {
            settings.trimmer.clip_duration = duration;
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.tools.ffmpeg.clone_from(ffmpeg);
        }
        self.filter.apply(settings);
    }
}
