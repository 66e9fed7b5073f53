//! Publishing: splice fresh data into the served page and side files.
//!
//! The publisher edits the previously published `index.html` in place (the
//! page is its own template: anchors survive every edit by construction) and
//! writes the secondary scenario fragments next to it.

pub mod template;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{GridPoint, ScenarioPoints, Summary};
use crate::error::AppError;
use crate::io::fragments;
use crate::report::fmt_thousands;
pub use template::{Slot, Template};

/// File name of the served page inside the site directory.
pub const INDEX_FILE: &str = "index.html";

/// Apply a run's outputs to the site directory.
///
/// Fails without touching any file if the page's anchors do not parse.
pub fn publish(
    site_dir: &Path,
    primary: &[GridPoint],
    secondary: &[ScenarioPoints],
    summary: &Summary,
    run_date: NaiveDate,
) -> Result<(), AppError> {
    let index_path = site_dir.join(INDEX_FILE);
    let html = std::fs::read_to_string(&index_path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to read page '{}': {e}", index_path.display()),
        )
    })?;

    let template = Template::parse(&html, &crate::domain::Region::ALL)?;
    let rendered = template.render(&slot_values(primary, summary, run_date))?;

    std::fs::write(&index_path, &rendered).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write page '{}': {e}", index_path.display()),
        )
    })?;
    info!(
        "published {} with {} points",
        index_path.display(),
        primary.len()
    );

    for scenario_points in secondary {
        let path = site_dir.join(scenario_points.scenario.fragment_file());
        fragments::write_fragment(
            &path,
            scenario_points.scenario.const_name,
            &scenario_points.points,
        )?;
        info!(
            "wrote {} ({} points)",
            path.display(),
            scenario_points.points.len()
        );
    }

    Ok(())
}

/// The fixed set of paths the release step stages.
pub fn published_paths(site_dir: &Path, secondary: &[ScenarioPoints]) -> Vec<PathBuf> {
    let mut paths = vec![site_dir.join(INDEX_FILE)];
    paths.extend(
        secondary
            .iter()
            .map(|s| site_dir.join(s.scenario.fragment_file())),
    );
    paths
}

fn slot_values(
    primary: &[GridPoint],
    summary: &Summary,
    run_date: NaiveDate,
) -> HashMap<Slot, String> {
    let mut values = HashMap::from([
        (Slot::Points, fragments::render_array_literal(primary)),
        (Slot::Date, run_date.format("%B %Y").to_string()),
        (Slot::Count, fmt_thousands(summary.used_count as i64)),
    ]);
    for stat in &summary.region_stats {
        values.insert(
            Slot::RegionStat(stat.region),
            fmt_thousands(stat.median_rent),
        );
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Region, RegionStat, Scenario};

    fn page_with_all_regions() -> String {
        let mut stats = String::new();
        for region in Region::ALL {
            stats.push_str(&format!(
                "<td id=\"stat-{}\">$1,000</td>\n",
                region.slug()
            ));
        }
        format!(
            "<html><script>\nconst HEAT_POINTS = [\n];\n</script>\n\
             <span id=\"updated-date\">Updated January 2020</span>\n\
             <span id=\"listing-count\">0</span>\n{stats}</html>\n"
        )
    }

    fn summary() -> Summary {
        Summary {
            region_stats: Region::ALL
                .iter()
                .map(|&region| RegionStat {
                    region,
                    median_rent: 2500,
                    count: 10,
                })
                .collect(),
            overall_median: 2500,
            active_count: 40,
            rented_count: 10,
            used_count: 50,
            skipped_records: 0,
            lookback_months: 4,
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn publishes_points_date_count_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), page_with_all_regions()).unwrap();

        let points = vec![
            GridPoint { lat: 40.75, lng: -73.99, rent: 3200, n: 12 },
            GridPoint { lat: 40.68, lng: -73.95, rent: 2800, n: 7 },
        ];
        publish(dir.path(), &points, &[], &summary(), run_date()).unwrap();

        let out = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert!(out.contains("{lat:40.75,lng:-73.99,rent:3200,n:12},"));
        assert!(out.contains("{lat:40.68,lng:-73.95,rent:2800,n:7},"));
        assert_eq!(out.matches("{lat:").count(), 2);
        assert!(out.contains(">Updated August 2026<"));
        assert!(out.contains("id=\"listing-count\">50<"));
        assert!(out.contains("id=\"stat-staten-island\">$2,500<"));
    }

    #[test]
    fn second_publish_with_same_data_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), page_with_all_regions()).unwrap();

        let points = vec![GridPoint { lat: 40.75, lng: -73.99, rent: 3200, n: 12 }];
        publish(dir.path(), &points, &[], &summary(), run_date()).unwrap();
        let first = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        publish(dir.path(), &points, &[], &summary(), run_date()).unwrap();
        let second = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_anchor_fails_and_leaves_page_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let broken = page_with_all_regions().replace("updated-date", "renamed-field");
        std::fs::write(dir.path().join(INDEX_FILE), &broken).unwrap();

        let err = publish(dir.path(), &[], &[], &summary(), run_date()).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(),
            broken
        );
    }

    #[test]
    fn writes_secondary_fragments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), page_with_all_regions()).unwrap();

        let secondary = vec![
            ScenarioPoints {
                scenario: Scenario::ACTIVE,
                points: vec![GridPoint { lat: 40.6, lng: -73.9, rent: 2100, n: 2 }],
            },
            ScenarioPoints {
                scenario: Scenario::MEAN,
                points: vec![],
            },
        ];
        publish(dir.path(), &[], &secondary, &summary(), run_date()).unwrap();

        let active = std::fs::read_to_string(dir.path().join("heat_points_active.js")).unwrap();
        assert!(active.starts_with("const HEAT_POINTS_ACTIVE = ["));
        let mean = std::fs::read_to_string(dir.path().join("heat_points_mean.js")).unwrap();
        assert_eq!(mean, "const HEAT_POINTS_MEAN = [\n];\n");
    }

    #[test]
    fn published_paths_enumerates_index_and_fragments() {
        let secondary = vec![
            ScenarioPoints { scenario: Scenario::ACTIVE, points: vec![] },
            ScenarioPoints { scenario: Scenario::MEAN, points: vec![] },
        ];
        let paths = published_paths(Path::new("site"), &secondary);
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with(INDEX_FILE));
        assert!(paths[1].ends_with("heat_points_active.js"));
        assert!(paths[2].ends_with("heat_points_mean.js"));
    }
}
