//! 長度掃描整合測試
//!
//! 以 shell script 假裝 ffprobe，依檔名回傳不同的幀數與幀率

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tempfile::TempDir;
use video_dataset_prep::component::DurationScanner;
use video_dataset_prep::component::duration_scanner::ScanOptions;
use video_dataset_prep::config::Settings;

const FAKE_FFPROBE: &str = r#"#!/bin/sh
for last; do :; done
case "$(basename -- "$last")" in
  *long*) echo '{"streams":[{"codec_type":"video","nb_frames":"300","avg_frame_rate":"30/1"}]}' ;;
  *exact*) echo '{"streams":[{"codec_type":"video","nb_frames":"90","avg_frame_rate":"30/1"}]}' ;;
  *nofps*) echo '{"streams":[{"codec_type":"video","nb_frames":"900","avg_frame_rate":"0/0","r_frame_rate":"0/0"}]}' ;;
  *broken*) exit 1 ;;
  *) echo '{"streams":[{"codec_type":"video","nb_frames":"30","avg_frame_rate":"30/1"}]}' ;;
esac
"#;

fn write_fake_ffprobe(dir: &Path) -> PathBuf {
    let path = dir.join("fake-ffprobe");
    fs::write(&path, FAKE_FFPROBE).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_scan_reports_only_videos_over_threshold() {
    let tools = TempDir::new().unwrap();
    let ffprobe = write_fake_ffprobe(tools.path());

    let input = TempDir::new().unwrap();
    let root = input.path();
    fs::create_dir_all(root.join("b_class")).unwrap();
    fs::create_dir_all(root.join("a_class")).unwrap();
    for name in [
        "b_class/long_1.mp4",
        "a_class/long_2.MKV",
        "a_class/exact.avi",
        "a_class/nofps.mov",
        "b_class/broken.wmv",
        "b_class/short.mpg",
        "b_class/long_ignored.txt",
    ] {
        fs::write(root.join(name), b"video").unwrap();
    }

    let mut settings = Settings::default();
    settings.scanner.input_dir = Some(root.to_path_buf());
    settings.scanner.duration_threshold = 3.0;
    settings.tools.ffprobe = ffprobe.to_string_lossy().into_owned();

    let options = ScanOptions::from_settings(&settings).unwrap();
    let report = DurationScanner::new(options, Arc::new(AtomicBool::new(false)))
        .run()
        .unwrap();

    assert_eq!(report.scanned, 6);
    assert_eq!(report.unreadable, 2);

    let found: Vec<_> = report.long_videos.iter().map(|v| v.path.clone()).collect();
    assert_eq!(
        found,
        [root.join("a_class/long_2.MKV"), root.join("b_class/long_1.mp4")]
    );
    assert!(
        report
            .long_videos
            .iter()
            .all(|v| (v.duration_seconds - 10.0).abs() < 1e-9)
    );
}

#[test]
fn test_missing_ffprobe_is_fatal() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.mp4"), b"video").unwrap();

    let mut settings = Settings::default();
    settings.scanner.input_dir = Some(input.path().to_path_buf());
    settings.tools.ffprobe = "definitely-not-a-real-ffprobe".to_string();

    let options = ScanOptions::from_settings(&settings).unwrap();
    let result = DurationScanner::new(options, Arc::new(AtomicBool::new(false))).run();

    assert!(result.is_err());
}

#[test]
fn test_scan_without_videos_reports_nothing() {
    let tools = TempDir::new().unwrap();
    let ffprobe = write_fake_ffprobe(tools.path());

    let input = TempDir::new().unwrap();
    fs::create_dir_all(input.path().join("punch")).unwrap();
    fs::write(input.path().join("punch/long_notes.txt"), b"not a video").unwrap();

    let mut settings = Settings::default();
    settings.scanner.input_dir = Some(input.path().to_path_buf());
    settings.tools.ffprobe = ffprobe.to_string_lossy().into_owned();

    let options = ScanOptions::from_settings(&settings).unwrap();
    let report = DurationScanner::new(options, Arc::new(AtomicBool::new(false)))
        .run()
        .unwrap();

    assert_eq!(report.scanned, 0);
    assert_eq!(report.unreadable, 0);
    assert!(report.long_videos.is_empty());
    assert!(!report.interrupted);
}
