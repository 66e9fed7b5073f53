//! Listing JSON ingest.
//!
//! The scraper's output files are arrays of loosely-shaped records. File-level
//! problems (missing file, not a JSON array) are fatal with exit code 2;
//! record-level problems are skipped and counted, never fatal — a partially
//! usable scrape is still a valid run input.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;

use crate::domain::Listing;
use crate::error::AppError;

/// Ingest output for one listing file.
#[derive(Debug, Clone)]
pub struct IngestedListings {
    pub listings: Vec<Listing>,
    pub records_read: usize,
    /// Records that failed to deserialize.
    pub skipped: usize,
}

/// Load one listing JSON file (an array of records).
pub fn load_listings(path: &Path) -> Result<IngestedListings, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open listings JSON '{}': {e}", path.display()),
        )
    })?;

    let records: Vec<serde_json::Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AppError::new(
                2,
                format!("Invalid listings JSON '{}': {e}", path.display()),
            )
        })?;

    let records_read = records.len();
    let mut listings = Vec::with_capacity(records_read);
    let mut skipped = 0usize;

    for record in records {
        match serde_json::from_value::<Listing>(record) {
            Ok(listing) => listings.push(listing),
            Err(e) => {
                skipped += 1;
                warn!("skipping malformed record in '{}': {e}", path.display());
            }
        }
    }

    Ok(IngestedListings {
        listings,
        records_read,
        skipped,
    })
}
