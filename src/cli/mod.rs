//! Command-line parsing for the rent heat-map pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/publishing code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Cadence;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rentmap", version, about = "NYC 1BR rent heat-map publishing pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full run: scrape, aggregate, publish, (quarterly) post, and release.
    Run(RunArgs),
    /// Aggregate previously scraped data and write the fragments + report.
    ///
    /// Never invokes the scraper; reads the JSON files from the data
    /// directory as-is.
    Aggregate(RunArgs),
    /// Aggregate previously scraped data and update the site directory,
    /// without committing or pushing anything.
    Publish(RunArgs),
    /// Write the quarterly social post from previously scraped data.
    Post(RunArgs),
}

/// Common options for all run variants.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Run cadence; quarterly runs additionally write the social post.
    #[arg(long, value_enum, default_value_t = Cadence::Monthly)]
    pub cadence: Cadence,

    /// Trailing months of rented-listing data to include.
    #[arg(short = 'l', long, default_value_t = 4)]
    pub lookback: u32,

    /// Directory holding the scraper's JSON output.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory holding the published site (a git checkout of the hosting
    /// branch).
    #[arg(long, default_value = "site")]
    pub site_dir: PathBuf,

    /// Directory for dated run logs.
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Scraper command, split on whitespace (else RENTMAP_SCRAPER from the
    /// environment / .env).
    #[arg(long)]
    pub scraper: Option<String>,

    /// Reuse existing JSON files instead of invoking the scraper.
    #[arg(long)]
    pub skip_scrape: bool,

    /// Minimum contributing listings per emitted grid cell.
    #[arg(long, default_value_t = 1)]
    pub min_cell_count: usize,

    /// Disable the inverse-distance smoothing pass (on by default).
    #[arg(long)]
    pub no_smooth: bool,

    /// Disable the neighbor-median clamping pass (on by default).
    #[arg(long)]
    pub no_clamp: bool,

    /// Git remote to push to.
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Hosting branch served by the static file host.
    #[arg(long, default_value = "gh-pages")]
    pub branch: String,

    /// Commit but do not push.
    #[arg(long)]
    pub no_push: bool,
}
