//! Population selection and grid aggregation.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};

use crate::agg::CleanListing;
use crate::domain::{GridPoint, Listing, ListingStatus, Population, Statistic};
use crate::geo::{self, CellKey};
use crate::stats;

/// Binning output: one point per cell meeting the minimum count.
#[derive(Debug, Clone)]
pub struct GridOutput {
    pub points: Vec<GridPoint>,
    pub cells_total: usize,
    /// Cells dropped for having fewer than `min_cell_count` listings.
    pub cells_dropped: usize,
}

/// Select the listings a scenario aggregates over.
///
/// Rented listings only count if their `rented_date` falls inside the
/// trailing lookback window; rented records without a date are excluded.
pub fn select_population(
    active: &[Listing],
    rented: &[Listing],
    population: Population,
    lookback_months: u32,
    run_date: NaiveDate,
) -> Vec<(Listing, ListingStatus)> {
    let mut out: Vec<(Listing, ListingStatus)> = active
        .iter()
        .map(|l| (l.clone(), ListingStatus::Active))
        .collect();

    if population == Population::ActiveAndRented {
        let cutoff = run_date
            .checked_sub_months(Months::new(lookback_months))
            .unwrap_or(run_date);
        out.extend(
            rented
                .iter()
                .filter(|l| l.rented_date.is_some_and(|d| d >= cutoff))
                .map(|l| (l.clone(), ListingStatus::Rented)),
        );
    }

    out
}

/// Count rented listings inside the lookback window (for run statistics).
pub fn rented_in_window(rented: &[Listing], lookback_months: u32, run_date: NaiveDate) -> usize {
    let cutoff = run_date
        .checked_sub_months(Months::new(lookback_months))
        .unwrap_or(run_date);
    rented
        .iter()
        .filter(|l| l.rented_date.is_some_and(|d| d >= cutoff))
        .count()
}

/// Bin cleaned listings into adaptive grid cells and aggregate each cell.
///
/// Emits one point per cell with at least `min_cell_count` listings, sorted
/// by descending rent then latitude for stable output.
pub fn aggregate(
    cleaned: &[CleanListing],
    statistic: Statistic,
    min_cell_count: usize,
) -> GridOutput {
    let mut cells: HashMap<CellKey, Vec<f64>> = HashMap::new();
    for l in cleaned {
        cells.entry(geo::cell_key(l.lat, l.lng)).or_default().push(l.rent);
    }

    let cells_total = cells.len();
    let mut cells_dropped = 0usize;
    let mut points = Vec::with_capacity(cells_total);

    for (key, rents) in cells {
        if rents.len() < min_cell_count.max(1) {
            cells_dropped += 1;
            continue;
        }
        let n = rents.len();
        let value = match statistic {
            Statistic::Median => stats::median(rents),
            Statistic::Mean => stats::mean(&rents),
        };
        points.push(GridPoint {
            lat: key.center_lat(),
            lng: key.center_lng(),
            rent: value.round() as i64,
            n,
        });
    }

    points.sort_by(|a, b| {
        b.rent
            .cmp(&a.rent)
            .then(a.lat.partial_cmp(&b.lat).unwrap_or(std::cmp::Ordering::Equal))
    });

    GridOutput {
        points,
        cells_total,
        cells_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;

    fn clean(lat: f64, lng: f64, rent: f64) -> CleanListing {
        CleanListing {
            lat,
            lng,
            rent,
            region: Region::Brooklyn,
            status: ListingStatus::Active,
        }
    }

    fn rented(date: Option<&str>) -> Listing {
        Listing {
            lat: Some(40.6),
            lng: Some(-73.95),
            rent: Some(2500.0),
            beds: Some(1),
            property_type: None,
            neighborhood: None,
            rented_date: date.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn population_respects_lookback_window() {
        let run_date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let rented_listings = vec![
            rented(Some("2026-06-15")),
            rented(Some("2026-01-15")),
            rented(None),
        ];
        let pop = select_population(
            &[],
            &rented_listings,
            Population::ActiveAndRented,
            4,
            run_date,
        );
        assert_eq!(pop.len(), 1);
        assert_eq!(rented_in_window(&rented_listings, 4, run_date), 1);
    }

    #[test]
    fn active_population_ignores_rented() {
        let run_date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let pop = select_population(
            &[rented(None)],
            &[rented(Some("2026-07-15"))],
            Population::Active,
            4,
            run_date,
        );
        assert_eq!(pop.len(), 1);
        assert_eq!(pop[0].1, ListingStatus::Active);
    }

    #[test]
    fn one_point_per_occupied_cell_and_none_for_empty() {
        // Two listings in one Brooklyn cell, one in a distant Queens cell.
        let cleaned = vec![
            clean(40.59, -73.91, 2000.0),
            clean(40.5905, -73.9105, 3000.0),
            clean(40.75, -73.80, 2600.0),
        ];
        let out = aggregate(&cleaned, Statistic::Median, 1);
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.cells_total, 2);
        assert_eq!(out.cells_dropped, 0);
    }

    #[test]
    fn median_and_mean_differ_unless_rents_equal() {
        let skewed = vec![
            clean(40.59, -73.91, 2000.0),
            clean(40.5905, -73.9105, 2000.0),
            clean(40.5902, -73.9102, 5000.0),
        ];
        let med = aggregate(&skewed, Statistic::Median, 1);
        let mean = aggregate(&skewed, Statistic::Mean, 1);
        assert_eq!(med.points[0].rent, 2000);
        assert_eq!(mean.points[0].rent, 3000);

        let flat = vec![
            clean(40.59, -73.91, 2400.0),
            clean(40.5905, -73.9105, 2400.0),
        ];
        assert_eq!(
            aggregate(&flat, Statistic::Median, 1).points,
            aggregate(&flat, Statistic::Mean, 1).points
        );
    }

    #[test]
    fn min_cell_count_drops_thin_cells() {
        let cleaned = vec![
            clean(40.59, -73.91, 2000.0),
            clean(40.5905, -73.9105, 3000.0),
            clean(40.75, -73.80, 2600.0),
        ];
        let out = aggregate(&cleaned, Statistic::Median, 2);
        assert_eq!(out.points.len(), 1);
        assert_eq!(out.cells_dropped, 1);
        assert_eq!(out.points[0].n, 2);
    }

    #[test]
    fn points_sorted_by_descending_rent() {
        let cleaned = vec![
            clean(40.59, -73.91, 2000.0),
            clean(40.75, -73.80, 2600.0),
            clean(40.88, -73.85, 1800.0),
        ];
        let out = aggregate(&cleaned, Statistic::Median, 1);
        let rents: Vec<i64> = out.points.iter().map(|p| p.rent).collect();
        assert_eq!(rents, vec![2600, 2000, 1800]);
    }
}
