//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up the dated run log
//! - dispatches to the pipeline stages

use chrono::Local;
use clap::Parser;

use crate::cli::{Cli, Command, RunArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rentmap` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let config = setup(&args, false)?;
            pipeline::run_full(&config)
        }
        Command::Aggregate(args) => {
            let config = setup(&args, true)?;
            let batch = pipeline::fetch_listings(&config)?;
            let output = pipeline::aggregate_all(&config, &batch)?;
            pipeline::write_intermediates(&config, &output)?;
            println!("{}", output.report);
            Ok(())
        }
        Command::Publish(args) => {
            let config = setup(&args, true)?;
            let batch = pipeline::fetch_listings(&config)?;
            let output = pipeline::aggregate_all(&config, &batch)?;
            pipeline::write_intermediates(&config, &output)?;
            crate::publish::publish(
                &config.site_dir,
                &output.primary.points,
                &output.secondary,
                &output.summary,
                config.run_date,
            )
        }
        Command::Post(args) => {
            let config = setup(&args, true)?;
            let batch = pipeline::fetch_listings(&config)?;
            let output = pipeline::aggregate_all(&config, &batch)?;
            let path = pipeline::write_post(&config, &output.summary)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Build the run config and open the dated log. Partial-run subcommands
/// pass `offline` to skip the scraper unconditionally.
fn setup(args: &RunArgs, offline: bool) -> Result<RunConfig, AppError> {
    let mut config = run_config_from_args(args);
    if offline {
        config.skip_scrape = true;
    }
    let log_path = crate::logging::init(&config.log_dir, config.run_date)?;
    tracing::info!("run log: {}", log_path.display());
    Ok(config)
}

/// Resolve CLI arguments into a `RunConfig`. Post-processing passes are on
/// unless their opt-out flag is given.
pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        data_dir: args.data_dir.clone(),
        site_dir: args.site_dir.clone(),
        log_dir: args.log_dir.clone(),
        cadence: args.cadence,
        lookback_months: args.lookback,
        run_date: Local::now().date_naive(),
        min_cell_count: args.min_cell_count,
        smooth: !args.no_smooth,
        clamp: !args.no_clamp,
        scraper_cmd: args.scraper.clone(),
        skip_scrape: args.skip_scrape,
        remote: args.remote.clone(),
        branch: args.branch.clone(),
        push: !args.no_push,
    }
}
