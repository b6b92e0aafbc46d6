use crate::component::batch_standardizer::{StandardizeOptions, default_worker_count};
use crate::component::clip_trimmer::TrimOptions;
use crate::component::duration_scanner::ScanOptions;
use crate::component::{BatchStandardizer, ClipTrimmer, DurationScanner};
use crate::config::{Config, save_settings};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_duration_scanner(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let scanner = &mut config.settings.scanner;
    scanner.input_dir = Some(prompt_path("請輸入要掃描的影片資料夾路徑", scanner.input_dir.as_deref())?);
    scanner.duration_threshold = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("長度門檻（秒）")
        .default(scanner.duration_threshold)
        .interact_text()?;
    remember_settings(config);

    let result = ScanOptions::from_settings(&config.settings)
        .and_then(|options| DurationScanner::new(options, Arc::clone(shutdown_signal)).run());
    report_error(result.map(|_| ()));

    pause(term)?;
    Ok(())
}

pub fn run_batch_standardizer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let standardizer = &mut config.settings.standardizer;
    standardizer.input_dir = Some(prompt_path(
        "請輸入原始資料集路徑（第一層資料夾為類別）",
        standardizer.input_dir.as_deref(),
    )?);
    standardizer.output_dir = Some(prompt_path(
        "請輸入輸出資料夾路徑",
        standardizer.output_dir.as_deref(),
    )?);
    let workers: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("同時轉檔數量")
        .default(standardizer.worker_count.unwrap_or_else(default_worker_count))
        .interact_text()?;
    standardizer.worker_count = Some(workers);
    remember_settings(config);

    let result = StandardizeOptions::from_settings(&config.settings)
        .and_then(|options| BatchStandardizer::new(options, Arc::clone(shutdown_signal)).run());
    report_error(result.map(|_| ()));

    pause(term)?;
    Ok(())
}

pub fn run_clip_trimmer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let trimmer = &mut config.settings.trimmer;
    trimmer.input_dir = Some(prompt_path("請輸入影片資料夾路徑", trimmer.input_dir.as_deref())?);
    trimmer.output_dir = Some(prompt_path("請輸入輸出資料夾路徑", trimmer.output_dir.as_deref())?);
    trimmer.clip_duration = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("片段長度（秒）")
        .default(trimmer.clip_duration)
        .interact_text()?;
    remember_settings(config);

    let result = TrimOptions::from_settings(&config.settings)
        .and_then(|options| ClipTrimmer::new(options, Arc::clone(shutdown_signal)).run());
    report_error(result.map(|_| ()));

    pause(term)?;
    Ok(())
}

fn prompt_path(prompt: &str, last_used: Option<&Path>) -> Result<PathBuf> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
    if let Some(path) = last_used {
        input = input.default(path.display().to_string());
    }
    let path = input.interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// 記住這次輸入的路徑與數值，下次作為預設值
fn remember_settings(config: &Config) {
    if let Err(e) = save_settings(&config.settings, &config.settings_path) {
        warn!("無法儲存設定: {e:#}");
    }
}

fn report_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{} {e:#}", style("錯誤:").red().bold());
    }
}
