//! Listing sources.
//!
//! `ScraperSource` shells out to the external scraper, which is treated as an
//! opaque long-running call: no timeout, no retry, any failure aborts the run
//! (exit code 3). `FileSource` skips the scrape and re-reads the JSON files
//! from a previous run.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::listings::{self, IngestedListings};

/// Active-listings file name inside the data directory.
pub const ACTIVE_FILE: &str = "listings_raw.json";
/// Rented-listings file name inside the data directory.
pub const RENTED_FILE: &str = "rented_raw.json";

/// Environment variable naming the scraper command.
pub const SCRAPER_ENV: &str = "RENTMAP_SCRAPER";

/// Both listing collections for a run.
#[derive(Debug, Clone)]
pub struct ListingBatch {
    pub active: IngestedListings,
    pub rented: IngestedListings,
}

impl ListingBatch {
    /// Malformed records skipped across both files.
    pub fn skipped(&self) -> usize {
        self.active.skipped + self.rented.skipped
    }
}

/// A producer of the two listing collections, given a lookback window.
pub trait ListingSource {
    fn fetch(&self, lookback_months: u32) -> Result<ListingBatch, AppError>;
}

/// Runs the external scraper, then loads its output files.
///
/// The configured command is split on whitespace into a program and fixed
/// arguments; neither may itself contain spaces (wrap the scraper in a
/// small shell script if its path does).
pub struct ScraperSource {
    command: String,
    data_dir: PathBuf,
}

impl ScraperSource {
    /// Resolve the scraper command from the config override or the
    /// environment (`.env` supported).
    pub fn from_env(config: &RunConfig) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let command = match &config.scraper_cmd {
            Some(cmd) => cmd.clone(),
            None => std::env::var(SCRAPER_ENV).map_err(|_| {
                AppError::new(
                    2,
                    format!("Missing {SCRAPER_ENV} in environment (.env) and no --scraper given."),
                )
            })?,
        };
        Ok(Self {
            command,
            data_dir: config.data_dir.clone(),
        })
    }
}

impl ListingSource for ScraperSource {
    fn fetch(&self, lookback_months: u32) -> Result<ListingBatch, AppError> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::new(2, "Scraper command is empty."))?;

        info!("invoking scraper: {}", self.command);
        let status = Command::new(program)
            .args(parts)
            .arg("--out-dir")
            .arg(&self.data_dir)
            .arg("--lookback-months")
            .arg(lookback_months.to_string())
            .status()
            .map_err(|e| AppError::new(3, format!("Failed to launch scraper '{program}': {e}")))?;

        if !status.success() {
            return Err(AppError::new(
                3,
                format!("Scraper exited with {status}; aborting run."),
            ));
        }

        load_batch(&self.data_dir)
    }
}

/// Reads a previous scrape's output without invoking the scraper.
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl ListingSource for FileSource {
    fn fetch(&self, _lookback_months: u32) -> Result<ListingBatch, AppError> {
        load_batch(&self.data_dir)
    }
}

fn load_batch(data_dir: &Path) -> Result<ListingBatch, AppError> {
    let active = listings::load_listings(&data_dir.join(ACTIVE_FILE))?;
    let rented = listings::load_listings(&data_dir.join(RENTED_FILE))?;
    info!(
        "loaded {} active + {} rented records ({} skipped)",
        active.records_read,
        rented.records_read,
        active.skipped + rented.skipped
    );
    Ok(ListingBatch { active, rented })
}
