use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 計算長度所需的影片資訊
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub frame_count: u64,
    pub frame_rate: f64,
}

impl VideoInfo {
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        compute_duration(self.frame_count, self.frame_rate)
    }
}

/// 長度 = 總幀數 / 幀率；幀率不大於 0 時為 0.0
#[must_use]
pub fn compute_duration(frame_count: u64, frame_rate: f64) -> f64 {
    if frame_rate > 0.0 {
        frame_count as f64 / frame_rate
    } else {
        0.0
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    nb_frames: Option<String>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(ffprobe: &str, path: &Path) -> Result<VideoInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ffprobe_output(&stdout).with_context(|| format!("無法解析影片: {}", path.display()))
}

fn parse_ffprobe_output(json: &str) -> Result<VideoInfo> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).with_context(|| "無法解析 ffprobe 輸出")?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow::anyhow!("找不到視訊串流"))?;

    // avg_frame_rate 可能是 "0/0"，此時改用 r_frame_rate
    let frame_rate = video_stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .filter(|rate| *rate > 0.0)
        .or_else(|| video_stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(0.0);

    // 容器沒有記錄 nb_frames 時，以長度乘幀率估算
    let frame_count = video_stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            let duration = probe
                .format
                .as_ref()
                .and_then(|f| f.duration.as_deref())
                .or(video_stream.duration.as_deref())
                .and_then(|d| d.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            estimate_frame_count(duration, frame_rate)
        });

    Ok(VideoInfo {
        frame_count,
        frame_rate,
    })
}

fn estimate_frame_count(duration_seconds: f64, frame_rate: f64) -> u64 {
    if duration_seconds > 0.0 && frame_rate > 0.0 {
        (duration_seconds * frame_rate).round() as u64
    } else {
        0
    }
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_invalid() {
        assert!(parse_frame_rate("invalid").is_none());
        assert!(parse_frame_rate("30/0").is_none());
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_compute_duration() {
        assert!((compute_duration(90, 30.0) - 3.0).abs() < f64::EPSILON);
        assert!((compute_duration(300, 25.0) - 12.0).abs() < f64::EPSILON);
        assert_eq!(compute_duration(90, 0.0), 0.0);
        assert_eq!(compute_duration(90, -1.0), 0.0);
    }

    #[test]
    fn test_parse_output_with_nb_frames() {
        let json = r#"{
            "streams": [
                { "codec_type": "audio", "nb_frames": "10" },
                { "codec_type": "video", "nb_frames": "150", "avg_frame_rate": "30/1", "r_frame_rate": "30/1" }
            ],
            "format": { "duration": "99.0" }
        }"#;
        let info = parse_ffprobe_output(json).unwrap();
        assert_eq!(info.frame_count, 150);
        assert!((info.duration_seconds() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_output_estimates_missing_frame_count() {
        let json = r#"{
            "streams": [
                { "codec_type": "video", "avg_frame_rate": "0/0", "r_frame_rate": "25/1" }
            ],
            "format": { "duration": "4.000000" }
        }"#;
        let info = parse_ffprobe_output(json).unwrap();
        assert!((info.frame_rate - 25.0).abs() < 1e-9);
        assert_eq!(info.frame_count, 100);
    }

    #[test]
    fn test_parse_output_zero_frame_rate_gives_zero_duration() {
        let json = r#"{
            "streams": [
                { "codec_type": "video", "nb_frames": "120", "avg_frame_rate": "0/0", "r_frame_rate": "0/0" }
            ]
        }"#;
        let info = parse_ffprobe_output(json).unwrap();
        assert_eq!(info.frame_rate, 0.0);
        assert_eq!(info.duration_seconds(), 0.0);
    }

    #[test]
    fn test_parse_output_without_video_stream() {
        let json = r#"{ "streams": [ { "codec_type": "audio" } ] }"#;
        assert!(parse_ffprobe_output(json).is_err());
    }
}
