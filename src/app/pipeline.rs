//! Shared run pipeline used by all subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! scrape -> aggregate (3 scenarios) -> publish -> (quarterly) post -> release
//!
//! Stages pass their results in memory; the fragments and the text report are
//! also written to the data directory so a failed or suspicious run can be
//! inspected by hand.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::agg::{self, FilterCounts};
use crate::data::{FileSource, ListingBatch, ListingSource, ScraperSource};
use crate::domain::{Cadence, RunConfig, Scenario, ScenarioPoints, Summary};
use crate::error::AppError;
use crate::io::fragments;
use crate::release::{self, ReleaseOutcome};
use crate::report;

/// All computed outputs of one aggregation pass.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub primary: ScenarioPoints,
    pub secondary: Vec<ScenarioPoints>,
    pub summary: Summary,
    pub filter_counts: FilterCounts,
    pub report: String,
}

/// Execute the full pipeline: fail-fast, strictly sequential.
pub fn run_full(config: &RunConfig) -> Result<(), AppError> {
    let batch = fetch_listings(config)?;
    let output = aggregate_all(config, &batch)?;
    write_intermediates(config, &output)?;

    crate::publish::publish(
        &config.site_dir,
        &output.primary.points,
        &output.secondary,
        &output.summary,
        config.run_date,
    )?;

    let mut staged = crate::publish::published_paths(&config.site_dir, &output.secondary);
    if config.cadence == Cadence::Quarterly {
        staged.push(write_post(config, &output.summary)?);
    }

    let outcome = release::release(
        &config.site_dir,
        &staged,
        &output.summary,
        &config.remote,
        &config.branch,
        config.push,
    )?;
    if outcome == ReleaseOutcome::NothingToCommit {
        info!("run finished with no site changes");
    } else {
        info!("run finished and released");
    }
    Ok(())
}

/// Obtain both listing collections, scraping unless configured otherwise.
pub fn fetch_listings(config: &RunConfig) -> Result<ListingBatch, AppError> {
    if config.skip_scrape {
        FileSource::new(&config.data_dir).fetch(config.lookback_months)
    } else {
        ScraperSource::from_env(config)?.fetch(config.lookback_months)
    }
}

/// Run all three scenarios and build the run summary from the primary one.
pub fn aggregate_all(config: &RunConfig, batch: &ListingBatch) -> Result<RunOutput, AppError> {
    let mut primary: Option<(ScenarioPoints, Summary, FilterCounts)> = None;
    let mut secondary = Vec::new();

    for scenario in Scenario::ALL {
        let population = agg::select_population(
            &batch.active.listings,
            &batch.rented.listings,
            scenario.population,
            config.lookback_months,
            config.run_date,
        );
        let (cleaned, counts) = agg::clean(&population);
        let grid = agg::aggregate(&cleaned, scenario.statistic, config.min_cell_count);
        info!(
            "scenario {}: {} listings -> {} points ({} thin cells dropped)",
            scenario.name,
            cleaned.len(),
            grid.points.len(),
            grid.cells_dropped
        );

        let mut points = grid.points;
        if config.smooth {
            points = agg::smooth(&points);
        }
        if config.clamp {
            let (clamped, n) = agg::clamp_outliers(&points);
            if n > 0 {
                info!("scenario {}: clamped {n} outlier cells", scenario.name);
            }
            points = clamped;
        }
        if points.is_empty() {
            warn!("scenario {} produced no points", scenario.name);
        }

        let scenario_points = ScenarioPoints { scenario, points };
        if scenario == Scenario::BASELINE {
            let summary = report::compute_summary(
                &cleaned,
                batch.active.listings.len(),
                agg::rented_in_window(
                    &batch.rented.listings,
                    config.lookback_months,
                    config.run_date,
                ),
                batch.skipped(),
                config.lookback_months,
            );
            primary = Some((scenario_points, summary, counts));
        } else {
            secondary.push(scenario_points);
        }
    }

    // Scenario::ALL always contains the baseline.
    let (primary, summary, filter_counts) = primary
        .ok_or_else(|| AppError::new(4, "No primary scenario configured."))?;

    let rendered = report::format_report(&summary, &filter_counts);
    info!("\n{rendered}");

    Ok(RunOutput {
        primary,
        secondary,
        summary,
        filter_counts,
        report: rendered,
    })
}

/// Write the per-scenario fragments and the text report into the data
/// directory for manual inspection.
pub fn write_intermediates(config: &RunConfig, output: &RunOutput) -> Result<(), AppError> {
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        AppError::new(
            2,
            format!(
                "Failed to create data dir '{}': {e}",
                config.data_dir.display()
            ),
        )
    })?;

    for sp in std::iter::once(&output.primary).chain(&output.secondary) {
        fragments::write_fragment(
            &config.data_dir.join(sp.scenario.fragment_file()),
            sp.scenario.const_name,
            &sp.points,
        )?;
    }

    let report_path = config.data_dir.join("report.txt");
    std::fs::write(&report_path, &output.report).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write report '{}': {e}", report_path.display()),
        )
    })?;
    Ok(())
}

/// Render and write the quarterly post; returns its path.
pub fn write_post(config: &RunConfig, summary: &Summary) -> Result<PathBuf, AppError> {
    let label = report::quarter_label(config.run_date);
    let post = report::format_post(summary, &label);
    let path = config
        .site_dir
        .join(format!("post-{}.txt", label.replace(' ', "-")));
    std::fs::write(&path, post).map_err(|e| {
        AppError::new(2, format!("Failed to write post '{}': {e}", path.display()))
    })?;
    Ok(path)
}
