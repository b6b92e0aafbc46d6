use crate::config::Config;
use crate::menu::handlers::{run_batch_standardizer, run_clip_trimmer, run_duration_scanner};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 回傳 `false` 表示使用者選擇離開
pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 影片資料集前處理 ===").cyan().bold());
    println!("{}", style("按 ESC 離開").dim());

    let options = vec![
        "找出過長的影片",
        "批次標準化影片（30fps / 480p / H.264）",
        "擷取影片開頭片段",
        "離開",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    // 上一個功能被中斷後，新的功能重新開始
    shutdown_signal.store(false, Ordering::SeqCst);

    match selection {
        Some(0) => {
            run_duration_scanner(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_batch_standardizer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            run_clip_trimmer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) | None => Ok(false),
        _ => unreachable!(),
    }
}
