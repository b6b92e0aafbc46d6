use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use env_logger::{Env, WriteStyle};
use log::{info, warn};
use std::io::Write;
use std::process;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use video_dataset_prep::cli::{Cli, Commands};
use video_dataset_prep::component::batch_standardizer::StandardizeOptions;
use video_dataset_prep::component::clip_trimmer::TrimOptions;
use video_dataset_prep::component::duration_scanner::ScanOptions;
use video_dataset_prep::component::{BatchStandardizer, ClipTrimmer, DurationScanner};
use video_dataset_prep::config::Config;
use video_dataset_prep::menu::show_main_menu;
use video_dataset_prep::signal::setup_shutdown_signal;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .write_style(WriteStyle::Never)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run() {
        eprintln!("{} {e:#}", style("錯誤:").red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let shutdown_signal = setup_shutdown_signal()?;

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new()?,
    };

    match &cli.command {
        Some(Commands::Scan(args)) => {
            args.apply(&mut config.settings);
            let options = ScanOptions::from_settings(&config.settings)?;
            DurationScanner::new(options, shutdown_signal).run()?;
        }
        Some(Commands::Standardize(args)) => {
            args.apply(&mut config.settings);
            let options = StandardizeOptions::from_settings(&config.settings)?;
            BatchStandardizer::new(options, shutdown_signal).run()?;
        }
        Some(Commands::Trim(args)) => {
            args.apply(&mut config.settings);
            let options = TrimOptions::from_settings(&config.settings)?;
            ClipTrimmer::new(options, shutdown_signal).run()?;
        }
        None => run_interactive(&shutdown_signal, &mut config)?,
    }

    Ok(())
}

fn run_interactive(shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    let term = Term::stdout();

    loop {
        match show_main_menu(&term, shutdown_signal, config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style("再見！").green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                return Err(e);
            }
        }
    }

    Ok(())
}
