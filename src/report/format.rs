//! Summary computation and the human-readable run report.
//!
//! Formatting is kept in one place so output changes stay localized.

use std::collections::HashMap;

use crate::agg::{CleanListing, FilterCounts};
use crate::domain::{Region, RegionStat, Summary};
use crate::stats;

/// Compute the per-region and overall aggregates for a run.
///
/// Region stats cover the five boroughs in display order; listings assigned
/// `Region::Unknown` contribute to the overall median but not to any borough.
pub fn compute_summary(
    cleaned: &[CleanListing],
    active_count: usize,
    rented_count: usize,
    skipped_records: usize,
    lookback_months: u32,
) -> Summary {
    let mut by_region: HashMap<Region, Vec<f64>> = HashMap::new();
    for l in cleaned {
        by_region.entry(l.region).or_default().push(l.rent);
    }

    let region_stats = Region::ALL
        .iter()
        .map(|&region| {
            let rents = by_region.remove(&region).unwrap_or_default();
            RegionStat {
                region,
                count: rents.len(),
                median_rent: stats::median(rents).round() as i64,
            }
        })
        .collect();

    let overall_median = stats::median(cleaned.iter().map(|l| l.rent).collect()).round() as i64;

    Summary {
        region_stats,
        overall_median,
        active_count,
        rented_count,
        used_count: cleaned.len(),
        skipped_records,
        lookback_months,
    }
}

/// Format the full run report (input stats + filter drops + borough medians).
pub fn format_report(summary: &Summary, counts: &FilterCounts) -> String {
    let mut out = String::new();

    out.push_str("=== rentmap - NYC 1BR rent heat map ===\n");
    out.push_str(&format!(
        "Input: {} active + {} rented ({}mo lookback)\n",
        summary.active_count, summary.rented_count, summary.lookback_months
    ));
    if summary.skipped_records > 0 {
        out.push_str(&format!(
            "Skipped {} malformed records\n",
            summary.skipped_records
        ));
    }

    out.push_str("\nDropped by filters:\n");
    out.push_str(&format!("  not 1BR          : {}\n", counts.not_one_bedroom));
    out.push_str(&format!("  no coordinates   : {}\n", counts.missing_coords));
    out.push_str(&format!("  no rent          : {}\n", counts.missing_rent));
    out.push_str(&format!("  rent > $25,000   : {}\n", counts.high_rent));
    out.push_str(&format!("  rent < $500      : {}\n", counts.low_rent));
    out.push_str(&format!("  bad property type: {}\n", counts.bad_type));
    out.push_str(&format!("  rent-stabilized  : {}\n", counts.rs_flagged));
    out.push_str(&format!("Listings used: {}\n", summary.used_count));

    out.push_str("\nBorough medians:\n");
    for stat in &summary.region_stats {
        out.push_str(&format!(
            "  {:<13} ${} (n={})\n",
            stat.region.display_name(),
            fmt_thousands(stat.median_rent),
            stat.count
        ));
    }
    out.push_str(&format!(
        "\nNYC overall median: ${}\n",
        fmt_thousands(summary.overall_median)
    ));

    out
}

/// Group a non-negative integer with comma thousands separators.
pub fn fmt_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingStatus;

    fn clean(region: Region, rent: f64) -> CleanListing {
        CleanListing {
            lat: 40.7,
            lng: -73.9,
            rent,
            region,
            status: ListingStatus::Active,
        }
    }

    #[test]
    fn summary_groups_by_region_in_display_order() {
        let cleaned = vec![
            clean(Region::Brooklyn, 2500.0),
            clean(Region::Brooklyn, 2700.0),
            clean(Region::Manhattan, 4200.0),
        ];
        let summary = compute_summary(&cleaned, 3, 0, 0, 4);

        assert_eq!(summary.region_stats.len(), 5);
        assert_eq!(summary.region_stats[0].region, Region::Manhattan);
        assert_eq!(summary.region_stats[0].median_rent, 4200);
        assert_eq!(summary.region_stats[1].region, Region::Brooklyn);
        assert_eq!(summary.region_stats[1].median_rent, 2600);
        assert_eq!(summary.region_stats[1].count, 2);
        // Empty boroughs still appear with zero counts.
        assert_eq!(summary.region_stats[4].count, 0);
        assert_eq!(summary.overall_median, 2700);
        assert_eq!(summary.used_count, 3);
    }

    #[test]
    fn unknown_region_counts_toward_overall_only() {
        let cleaned = vec![
            clean(Region::Unknown, 9000.0),
            clean(Region::Queens, 2400.0),
        ];
        let summary = compute_summary(&cleaned, 2, 0, 0, 4);
        let queens = &summary.region_stats[2];
        assert_eq!(queens.region, Region::Queens);
        assert_eq!(queens.count, 1);
        assert!(summary.region_stats.iter().all(|s| s.region != Region::Unknown));
        assert_eq!(summary.overall_median, 5700);
    }

    #[test]
    fn report_contains_counts_and_medians() {
        let cleaned = vec![clean(Region::Manhattan, 4200.0)];
        let summary = compute_summary(&cleaned, 1, 0, 2, 4);
        let report = format_report(&summary, &FilterCounts::default());
        assert!(report.contains("1 active + 0 rented (4mo lookback)"));
        assert!(report.contains("Skipped 2 malformed records"));
        assert!(report.contains("Manhattan     $4,200 (n=1)"));
        assert!(report.contains("NYC overall median: $4,200"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(950), "950");
        assert_eq!(fmt_thousands(4200), "4,200");
        assert_eq!(fmt_thousands(1234567), "1,234,567");
    }
}
