//! Listing cleaning and the rent-stabilized filter.
//!
//! Cleaning drops records that cannot or should not contribute to a 1BR
//! market-rate heat map: wrong bedroom count, missing coordinates, implausible
//! rents, and whole-building/commercial property types.
//!
//! The rent-stabilized (RS) filter then removes listings that look like
//! regulated rather than market rents:
//!
//! - non-round rents under $2,500 (DHCR legal-rent amounts)
//! - rents below 50% of the local spatial median (0.01° cells, medians
//!   defined only where a cell has ≥3 samples)
//!
//! Every drop is counted; nothing here is fatal.

use std::collections::HashMap;

use crate::domain::{Listing, ListingStatus, Region};
use crate::geo;
use crate::stats;

/// Rents above this are luxury noise, below `MIN_RENT` are data errors.
pub const MAX_RENT: f64 = 25_000.0;
pub const MIN_RENT: f64 = 500.0;

/// Property types that are whole buildings or non-residential.
const BAD_TYPES: [&str; 8] = [
    "THREEFAMILY",
    "TWOFAMILY",
    "MIXED_USE",
    "TOWNHOUSE",
    "LAND",
    "FOURFAMILY",
    "MULTIFAMILY",
    "COMMERCIAL",
];

/// Spatial-median grid edge for the RS filter.
const RS_SPATIAL_GRID: f64 = 0.01;
/// Minimum samples for a spatial cell to define a local median.
const RS_SPATIAL_MIN_N: usize = 3;
/// RS rule 2: flag below this fraction of the local spatial median.
const RS_SPATIAL_FRACTION: f64 = 0.50;
/// RS rule 1: non-round rents below this are assumed regulated.
const RS_ODD_RENT_CEILING: f64 = 2_500.0;

/// A listing that survived cleaning, with required fields resolved.
#[derive(Debug, Clone)]
pub struct CleanListing {
    pub lat: f64,
    pub lng: f64,
    pub rent: f64,
    pub region: Region,
    pub status: ListingStatus,
}

/// Drop accounting for one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub not_one_bedroom: usize,
    pub missing_coords: usize,
    pub missing_rent: usize,
    pub high_rent: usize,
    pub low_rent: usize,
    pub bad_type: usize,
    pub rs_flagged: usize,
}

impl FilterCounts {
    pub fn total_dropped(&self) -> usize {
        self.not_one_bedroom
            + self.missing_coords
            + self.missing_rent
            + self.high_rent
            + self.low_rent
            + self.bad_type
            + self.rs_flagged
    }
}

/// Run cleaning plus the RS filter over a population.
pub fn clean(population: &[(Listing, ListingStatus)]) -> (Vec<CleanListing>, FilterCounts) {
    let mut counts = FilterCounts::default();
    let mut cleaned = Vec::with_capacity(population.len());

    for (listing, status) in population {
        if listing.beds != Some(1) {
            counts.not_one_bedroom += 1;
            continue;
        }
        let (Some(lat), Some(lng)) = (listing.lat, listing.lng) else {
            counts.missing_coords += 1;
            continue;
        };
        let Some(rent) = listing.rent else {
            counts.missing_rent += 1;
            continue;
        };
        if rent > MAX_RENT {
            counts.high_rent += 1;
            continue;
        }
        if rent < MIN_RENT {
            counts.low_rent += 1;
            continue;
        }
        let bad_type = listing
            .property_type
            .as_deref()
            .is_some_and(|t| BAD_TYPES.contains(&t.to_uppercase().as_str()));
        if bad_type {
            counts.bad_type += 1;
            continue;
        }

        cleaned.push(CleanListing {
            lat,
            lng,
            rent,
            region: geo::region_for(listing, lat, lng),
            status: *status,
        });
    }

    let kept = apply_rs_filter(cleaned, &mut counts);
    (kept, counts)
}

/// Flag likely rent-stabilized listings and drop them.
fn apply_rs_filter(cleaned: Vec<CleanListing>, counts: &mut FilterCounts) -> Vec<CleanListing> {
    let spatial_medians = spatial_medians(&cleaned);

    let mut kept = Vec::with_capacity(cleaned.len());
    for l in cleaned {
        if l.rent < RS_ODD_RENT_CEILING && l.rent % 5.0 != 0.0 {
            counts.rs_flagged += 1;
            continue;
        }
        if let Some(local) = spatial_medians.get(&spatial_key(l.lat, l.lng)) {
            if l.rent < local * RS_SPATIAL_FRACTION {
                counts.rs_flagged += 1;
                continue;
            }
        }
        kept.push(l);
    }
    kept
}

fn spatial_key(lat: f64, lng: f64) -> (i64, i64) {
    (
        ((lat / RS_SPATIAL_GRID).round() * RS_SPATIAL_GRID * 1e6).round() as i64,
        ((lng / RS_SPATIAL_GRID).round() * RS_SPATIAL_GRID * 1e6).round() as i64,
    )
}

fn spatial_medians(cleaned: &[CleanListing]) -> HashMap<(i64, i64), f64> {
    let mut cells: HashMap<(i64, i64), Vec<f64>> = HashMap::new();
    for l in cleaned {
        cells.entry(spatial_key(l.lat, l.lng)).or_default().push(l.rent);
    }
    cells
        .into_iter()
        .filter(|(_, rents)| rents.len() >= RS_SPATIAL_MIN_N)
        .map(|(key, rents)| (key, stats::median(rents)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(lat: f64, lng: f64, rent: f64) -> (Listing, ListingStatus) {
        (
            Listing {
                lat: Some(lat),
                lng: Some(lng),
                rent: Some(rent),
                beds: Some(1),
                property_type: Some("CONDO".to_string()),
                neighborhood: Some("Chelsea".to_string()),
                rented_date: None,
            },
            ListingStatus::Active,
        )
    }

    #[test]
    fn drops_non_one_bedroom_and_counts_it() {
        let mut l = listing(40.75, -73.99, 3200.0);
        l.0.beds = Some(2);
        let (kept, counts) = clean(&[l]);
        assert!(kept.is_empty());
        assert_eq!(counts.not_one_bedroom, 1);
    }

    #[test]
    fn drops_missing_coordinates_and_rent_bounds() {
        let mut no_coords = listing(0.0, 0.0, 3200.0);
        no_coords.0.lat = None;
        let pop = vec![
            no_coords,
            listing(40.75, -73.99, 30_000.0),
            listing(40.75, -73.99, 200.0),
            listing(40.75, -73.99, 3200.0),
        ];
        let (kept, counts) = clean(&pop);
        assert_eq!(kept.len(), 1);
        assert_eq!(counts.missing_coords, 1);
        assert_eq!(counts.high_rent, 1);
        assert_eq!(counts.low_rent, 1);
    }

    #[test]
    fn drops_whole_building_property_types() {
        let mut l = listing(40.75, -73.99, 3200.0);
        l.0.property_type = Some("TownHouse".to_string());
        let (kept, counts) = clean(&[l]);
        assert!(kept.is_empty());
        assert_eq!(counts.bad_type, 1);
    }

    #[test]
    fn rs_filter_flags_odd_rents_under_ceiling() {
        // $1,847 is a DHCR-looking legal rent; $1,850 is a market ask.
        let pop = vec![listing(40.75, -73.99, 1_847.0), listing(40.75, -73.99, 1_850.0)];
        let (kept, counts) = clean(&pop);
        assert_eq!(kept.len(), 1);
        assert_eq!(counts.rs_flagged, 1);
        assert_eq!(kept[0].rent, 1_850.0);
    }

    #[test]
    fn rs_filter_flags_deep_discounts_to_the_spatial_median() {
        // Three listings define the local median (3200); the fourth is below
        // half of it and should be flagged.
        let pop = vec![
            listing(40.750, -73.990, 3_200.0),
            listing(40.751, -73.991, 3_200.0),
            listing(40.752, -73.989, 3_200.0),
            listing(40.750, -73.990, 1_500.0),
        ];
        let (kept, counts) = clean(&pop);
        assert_eq!(kept.len(), 3);
        assert_eq!(counts.rs_flagged, 1);
    }

    #[test]
    fn assigns_regions_during_cleaning() {
        let (kept, _) = clean(&[listing(40.75, -73.99, 3200.0)]);
        assert_eq!(kept[0].region, Region::Manhattan);
    }
}
