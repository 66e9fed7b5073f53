//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - deserialized straight from the scraper's JSON output
//! - carried in-memory between pipeline stages (no temp-file coupling)
//! - rendered into the published fragments and reports

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Run cadence. Quarterly runs additionally produce the social post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Monthly,
    Quarterly,
}

/// A raw listing record as produced by the scraper.
///
/// Everything is optional at the wire level; ingest and the cleaning filters
/// decide what is usable. Records that fail to deserialize at all are skipped
/// with a count, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rent: Option<f64>,
    pub beds: Option<i64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub neighborhood: Option<String>,
    /// Present only in the rented-listings file.
    pub rented_date: Option<NaiveDate>,
}

/// Whether a listing came from the active or the rented file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Rented,
}

/// A geographic grid cell's aggregated rent statistic.
///
/// Recomputed fresh on every run; there is no identity across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPoint {
    /// Cell-center latitude, rounded to 4 decimal places.
    pub lat: f64,
    /// Cell-center longitude, rounded to 4 decimal places.
    pub lng: f64,
    /// Aggregated rent in whole dollars.
    pub rent: i64,
    /// Contributing-listing count.
    pub n: usize,
}

/// NYC boroughs, plus a bucket for listings we cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
    StatenIsland,
    Unknown,
}

impl Region {
    /// The five real boroughs, in display order. `Unknown` is excluded.
    pub const ALL: [Region; 5] = [
        Region::Manhattan,
        Region::Brooklyn,
        Region::Queens,
        Region::Bronx,
        Region::StatenIsland,
    ];

    /// Human-readable label for reports and the published page.
    pub fn display_name(self) -> &'static str {
        match self {
            Region::Manhattan => "Manhattan",
            Region::Brooklyn => "Brooklyn",
            Region::Queens => "Queens",
            Region::Bronx => "Bronx",
            Region::StatenIsland => "Staten Island",
            Region::Unknown => "Unknown",
        }
    }

    /// Stable identifier used in template anchors (`id="stat-<slug>"`).
    pub fn slug(self) -> &'static str {
        match self {
            Region::Manhattan => "manhattan",
            Region::Brooklyn => "brooklyn",
            Region::Queens => "queens",
            Region::Bronx => "bronx",
            Region::StatenIsland => "staten-island",
            Region::Unknown => "unknown",
        }
    }
}

/// One borough's aggregate for display substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStat {
    pub region: Region,
    pub median_rent: i64,
    pub count: usize,
}

/// Which listing population a scenario aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// Active listings only.
    Active,
    /// Active listings plus rented listings within the trailing lookback
    /// window (months).
    ActiveAndRented,
}

/// Which per-cell aggregate statistic a scenario uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Median,
    Mean,
}

/// One named variant of the aggregation.
///
/// The primary scenario's points are embedded into the published HTML; the
/// others are written as standalone fragment files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Short name used in logs and output file names.
    pub name: &'static str,
    /// JS declaration name for the rendered fragment.
    pub const_name: &'static str,
    pub population: Population,
    pub statistic: Statistic,
}

impl Scenario {
    /// Primary scenario: active + trailing rented, median rent.
    pub const BASELINE: Scenario = Scenario {
        name: "baseline",
        const_name: "HEAT_POINTS",
        population: Population::ActiveAndRented,
        statistic: Statistic::Median,
    };

    /// Active listings only, median rent.
    pub const ACTIVE: Scenario = Scenario {
        name: "active",
        const_name: "HEAT_POINTS_ACTIVE",
        population: Population::Active,
        statistic: Statistic::Median,
    };

    /// Active + trailing rented, mean rent.
    pub const MEAN: Scenario = Scenario {
        name: "mean",
        const_name: "HEAT_POINTS_MEAN",
        population: Population::ActiveAndRented,
        statistic: Statistic::Mean,
    };

    /// All scenarios, primary first.
    pub const ALL: [Scenario; 3] = [Scenario::BASELINE, Scenario::ACTIVE, Scenario::MEAN];

    /// Output file name for the rendered fragment.
    pub fn fragment_file(&self) -> String {
        format!("heat_points_{}.js", self.name)
    }
}

/// The points computed for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioPoints {
    pub scenario: Scenario,
    pub points: Vec<GridPoint>,
}

/// Per-run aggregation summary, passed in memory to the publisher and the
/// notifier (and rendered as the text report for the log).
#[derive(Debug, Clone)]
pub struct Summary {
    /// Per-borough medians over the primary scenario's population, display
    /// order, `Unknown` excluded.
    pub region_stats: Vec<RegionStat>,
    /// Overall median rent over the primary population.
    pub overall_median: i64,
    /// Listings read from the active file (before filtering).
    pub active_count: usize,
    /// Rented listings inside the lookback window (before filtering).
    pub rented_count: usize,
    /// Listings surviving all filters (the primary population).
    pub used_count: usize,
    /// Records that failed to deserialize across both input files.
    pub skipped_records: usize,
    pub lookback_months: u32,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the scraper's JSON output.
    pub data_dir: PathBuf,
    /// Directory holding the published site (index.html and fragments).
    pub site_dir: PathBuf,
    pub log_dir: PathBuf,

    pub cadence: Cadence,
    /// Trailing months of rented-listing data to include.
    pub lookback_months: u32,
    pub run_date: NaiveDate,

    /// Minimum contributing listings per emitted cell.
    pub min_cell_count: usize,
    /// Inverse-distance smoothing pass over the grid points.
    pub smooth: bool,
    /// Neighbor-median clamping pass for thin cells.
    pub clamp: bool,

    /// Scraper command override (else `RENTMAP_SCRAPER` from the env).
    pub scraper_cmd: Option<String>,
    /// Reuse existing JSON files instead of invoking the scraper.
    pub skip_scrape: bool,

    pub remote: String,
    pub branch: String,
    /// Commit but do not push (dry-run for the release step).
    pub push: bool,
}
