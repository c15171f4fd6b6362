mod chart;
mod config;
mod display;
mod reporter;
mod series;
mod stats;

use crate::config::Config;
use crate::reporter::{Outputs, Reporter};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML file overriding input paths and chart settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only plot, do not print the summary line.
    #[arg(long)]
    no_stats: bool,

    /// Do not open the chart window.
    #[arg(long)]
    no_display: bool,

    /// Also save the chart to this image file.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    log::info!("{cfg:#?}");

    let outputs = Outputs {
        print_stats: !args.no_stats,
        display: !args.no_display,
        save_file: args.save,
    };

    Reporter::new(cfg, outputs).run()
}
