//! Daylog CLI application
//!
//! Command-line interface for the daylog time tracker.

mod args;
mod cli;
mod prompt;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use daylog_core::Store;
use log::{info, LevelFilter};
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    let Args {
        dir,
        no_color,
        verbose,
        command,
    } = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            logger.filter_level(LevelFilter::Info);
        }
        _ => {
            logger.filter_level(LevelFilter::Debug);
        }
    }
    logger.init();

    let store = Store::open(dir).context("Failed to open the daylog directory")?;
    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(store, renderer);

    info!("daylog started");

    match command {
        Start { content, time } => cli.start(content, time),
        Restart { arg } => cli.restart(arg),
        Cancel => cli.cancel(),
        Finish { time } => cli.finish(time),
        List(range) => cli.list(range),
        Stat(range) => cli.stat(range),
        Plot(range) => cli.plot(range),
        Job(range) => cli.job(range),
        Jobstat(range) => cli.jobstat(range),
        Task { command } => cli.task(command),
        Set { expr } => cli.set(expr),
    }
}
