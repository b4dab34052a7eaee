mod analysis;
mod charts;
mod config;
mod engine;
#[cfg(test)]
mod fixtures;
mod loader;
mod models;
mod report;
mod types;

use std::io::{stderr, stdin, stdout};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::AppConfig;
use crate::engine::{run_menu, ReportEngine};
use crate::loader::load_dataset;

fn main() -> Result<()> {
    let config = AppConfig::from_args(std::env::args().skip(1));

    setup_logging(config.log_level);

    println!("Online Retail II report generator");
    println!("Loading [{}]...", config.workbook.display());

    let timer = Instant::now();
    let (dataset, cleaning) = match load_dataset(&config.workbook) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };
    info!("Loaded and cleaned workbook in: {:?}", timer.elapsed());

    println!(
        "Loaded {} rows; {} remain after cleaning.",
        cleaning.initial_count, cleaning.final_count
    );

    if dataset.is_empty() {
        println!("No rows survived cleaning; reports will only contain the overview.");
    }

    let engine = ReportEngine::new(&dataset, cleaning, &config.asset_dir);
    println!("Reports are written to [{}].", engine.asset_dir().display());

    run_menu(&engine, stdin().lock(), stdout().lock())?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the interactive menu, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
