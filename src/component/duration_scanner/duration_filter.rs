//! 長度篩選
//!
//! 逐一探測影片長度，保留嚴格超過門檻的檔案

use anyhow::Result;
use indicatif::ProgressBar;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 超過門檻的影片
#[derive(Debug, Clone, PartialEq)]
pub struct LongVideo {
    pub path: PathBuf,
    pub duration_seconds: f64,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub scanned: usize,
    /// 無法開啟或幀率無效的檔案數
    pub unreadable: usize,
    /// 依路徑排序
    pub long_videos: Vec<LongVideo>,
    pub interrupted: bool,
}

/// 依序探測 `paths` 並回傳長度大於 `threshold` 的影片
///
/// 探測失敗一律視為長度 0.0 並記錄警告，不會中斷掃描
pub fn find_long_videos<F>(
    paths: &[PathBuf],
    threshold: f64,
    mut probe: F,
    shutdown_signal: &AtomicBool,
    progress_bar: &ProgressBar,
) -> ScanReport
where
    F: FnMut(&Path) -> Result<f64>,
{
    let mut report = ScanReport::default();

    for path in paths {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，停止掃描");
            report.interrupted = true;
            break;
        }

        let duration_seconds = match probe(path) {
            Ok(duration) if duration > 0.0 => duration,
            Ok(_) => {
                warn!("影片長度為 0（幀率或幀數無效）: {}", path.display());
                report.unreadable += 1;
                0.0
            }
            Err(e) => {
                warn!("無法讀取影片 {}: {e:#}", path.display());
                report.unreadable += 1;
                0.0
            }
        };

        report.scanned += 1;
        if duration_seconds > threshold {
            report.long_videos.push(LongVideo {
                path: path.clone(),
                duration_seconds,
            });
        }
        progress_bar.inc(1);
    }

    report.long_videos.sort_by(|a, b| a.path.cmp(&b.path));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::compute_duration;
    use std::collections::HashMap;

    fn probe_table(entries: &[(&str, u64, f64)]) -> HashMap<PathBuf, (u64, f64)> {
        entries
            .iter()
            .map(|(path, frames, fps)| (PathBuf::from(path), (*frames, *fps)))
            .collect()
    }

    fn run(paths: &[&str], table: &HashMap<PathBuf, (u64, f64)>, threshold: f64) -> ScanReport {
        let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
        find_long_videos(
            &paths,
            threshold,
            |path| match table.get(path) {
                Some((frames, fps)) => Ok(compute_duration(*frames, *fps)),
                None => anyhow::bail!("cannot open"),
            },
            &AtomicBool::new(false),
            &ProgressBar::hidden(),
        )
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let table = probe_table(&[("/v/exact.mp4", 90, 30.0), ("/v/longer.mp4", 91, 30.0)]);
        let report = run(&["/v/exact.mp4", "/v/longer.mp4"], &table, 3.0);

        assert_eq!(report.scanned, 2);
        assert_eq!(report.long_videos.len(), 1);
        assert_eq!(report.long_videos[0].path, PathBuf::from("/v/longer.mp4"));
    }

    #[test]
    fn test_unreadable_and_zero_fps_never_reported() {
        let table = probe_table(&[("/v/zero_fps.avi", 1_000_000, 0.0)]);
        let report = run(&["/v/zero_fps.avi", "/v/broken.mov"], &table, 0.0);

        assert_eq!(report.scanned, 2);
        assert_eq!(report.unreadable, 2);
        assert!(report.long_videos.is_empty());
    }

    #[test]
    fn test_results_sorted_by_path() {
        let table = probe_table(&[
            ("/v/c.mp4", 300, 30.0),
            ("/v/a.mp4", 300, 30.0),
            ("/v/b.mp4", 30, 30.0),
        ]);
        let report = run(&["/v/c.mp4", "/v/a.mp4", "/v/b.mp4"], &table, 3.0);

        let paths: Vec<_> = report.long_videos.iter().map(|v| v.path.clone()).collect();
        assert_eq!(paths, [PathBuf::from("/v/a.mp4"), PathBuf::from("/v/c.mp4")]);
        assert!((report.long_videos[0].duration_seconds - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_stops_on_shutdown() {
        let paths = vec![PathBuf::from("/v/a.mp4")];
        let report = find_long_videos(
            &paths,
            1.0,
            |_| Ok(100.0),
            &AtomicBool::new(true),
            &ProgressBar::hidden(),
        );

        assert!(report.interrupted);
        assert_eq!(report.scanned, 0);
    }
}
