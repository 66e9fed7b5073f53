//! Spatial post-processing passes over the grid points.
//!
//! Both passes are optional (production runs enable them, tests and the raw
//! aggregation contract leave them off):
//!
//! - **Smoothing**: inverse-distance blend of each point with neighbors
//!   inside `SMOOTH_RADIUS`, with the point itself weighted `SELF_WEIGHT`.
//!   Evens out single-building artifacts without moving cell centers.
//! - **Clamping**: thin cells (n below `CLAMP_MAX_N`) whose rent exceeds
//!   1.5x the median of neighbors inside `CLAMP_RADIUS` are pulled down to
//!   that neighbor median. Kills isolated outlier cells.

use rayon::prelude::*;

use crate::domain::GridPoint;
use crate::geo;
use crate::stats;

/// Smoothing radius in degrees (~800m).
pub const SMOOTH_RADIUS: f64 = 0.008;
/// Inverse-distance self weight during smoothing.
const SELF_WEIGHT: f64 = 2.0;

/// Clamping neighborhood radius in degrees.
pub const CLAMP_RADIUS: f64 = 0.015;
/// Clamp when a thin cell exceeds this multiple of the neighbor median.
const CLAMP_THRESHOLD: f64 = 1.50;
/// Cells with at least this many listings are never clamped.
const CLAMP_MAX_N: usize = 10;

/// Inverse-distance smoothing. Counts and coordinates are preserved; only
/// the rent values blend.
pub fn smooth(points: &[GridPoint]) -> Vec<GridPoint> {
    points
        .par_iter()
        .map(|p| {
            let mut total_weight = SELF_WEIGHT;
            let mut weighted_rent = p.rent as f64 * SELF_WEIGHT;
            for other in points {
                let dist = geo::distance_deg(p.lat, p.lng, other.lat, other.lng);
                if dist > 0.0 && dist < SMOOTH_RADIUS {
                    let w = 1.0 / dist;
                    total_weight += w;
                    weighted_rent += other.rent as f64 * w;
                }
            }
            GridPoint {
                rent: (weighted_rent / total_weight).round() as i64,
                ..*p
            }
        })
        .collect()
}

/// Neighbor-median clamping for thin cells. Returns the new points and the
/// number of cells clamped.
pub fn clamp_outliers(points: &[GridPoint]) -> (Vec<GridPoint>, usize) {
    let clamped: Vec<GridPoint> = points
        .par_iter()
        .map(|p| {
            if p.n >= CLAMP_MAX_N {
                return p.clone();
            }
            let neighbors: Vec<f64> = points
                .iter()
                .filter(|other| {
                    !std::ptr::eq(*other, p)
                        && geo::distance_deg(p.lat, p.lng, other.lat, other.lng) < CLAMP_RADIUS
                })
                .map(|other| other.rent as f64)
                .collect();
            if neighbors.is_empty() {
                return p.clone();
            }
            let neighbor_median = stats::median(neighbors);
            if (p.rent as f64) > neighbor_median * CLAMP_THRESHOLD {
                return GridPoint {
                    rent: neighbor_median.round() as i64,
                    ..*p
                };
            }
            p.clone()
        })
        .collect();

    let count = clamped
        .iter()
        .zip(points)
        .filter(|(after, before)| after.rent != before.rent)
        .count();
    (clamped, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64, rent: i64, n: usize) -> GridPoint {
        GridPoint { lat, lng, rent, n }
    }

    #[test]
    fn smoothing_pulls_neighbors_together() {
        let points = vec![
            point(40.7500, -73.9900, 2000, 5),
            point(40.7520, -73.9900, 4000, 5),
        ];
        let smoothed = smooth(&points);
        assert!(smoothed[0].rent > 2000);
        assert!(smoothed[1].rent < 4000);
        // Coordinates and counts never move.
        assert_eq!(smoothed[0].lat, points[0].lat);
        assert_eq!(smoothed[0].n, points[0].n);
    }

    #[test]
    fn smoothing_ignores_points_outside_the_radius() {
        let points = vec![
            point(40.7500, -73.9900, 2000, 5),
            point(40.8500, -73.9900, 4000, 5),
        ];
        let smoothed = smooth(&points);
        assert_eq!(smoothed[0].rent, 2000);
        assert_eq!(smoothed[1].rent, 4000);
    }

    #[test]
    fn clamping_pulls_down_thin_outliers() {
        let points = vec![
            point(40.7500, -73.9900, 9000, 2),
            point(40.7520, -73.9900, 3000, 12),
            point(40.7540, -73.9900, 3200, 12),
        ];
        let (clamped, count) = clamp_outliers(&points);
        assert_eq!(count, 1);
        assert_eq!(clamped[0].rent, 3100);
        // Well-populated cells are untouched.
        assert_eq!(clamped[1].rent, 3000);
    }

    #[test]
    fn clamping_skips_cells_with_no_neighbors() {
        let points = vec![point(40.7500, -73.9900, 9000, 2)];
        let (clamped, count) = clamp_outliers(&points);
        assert_eq!(count, 0);
        assert_eq!(clamped[0].rent, 9000);
    }
}
