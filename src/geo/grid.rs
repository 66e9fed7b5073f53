//! Adaptive grid binning.
//!
//! Dense areas (the Manhattan core and the Brooklyn brownstone belt) get
//! finer 0.002° cells; everywhere else uses 0.003°. Cell keys are integer
//! microdegrees so they hash exactly — binning must not depend on float
//! rounding noise.

/// Fine cell edge (degrees) for dense areas.
pub const DENSE_CELL_DEG: f64 = 0.002;
/// Default cell edge (degrees).
pub const DEFAULT_CELL_DEG: f64 = 0.003;

/// A grid cell identity: center in microdegrees plus the cell size used.
///
/// Two listings land in the same cell iff their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub lat_micro: i64,
    pub lng_micro: i64,
    pub size_micro: i64,
}

impl CellKey {
    /// Cell-center latitude, rounded to 4 decimal places for output.
    pub fn center_lat(&self) -> f64 {
        round4(self.lat_micro as f64 / 1e6)
    }

    /// Cell-center longitude, rounded to 4 decimal places for output.
    pub fn center_lng(&self) -> f64 {
        round4(self.lng_micro as f64 / 1e6)
    }
}

/// Cell edge length for a coordinate.
pub fn cell_size(lat: f64, lng: f64) -> f64 {
    // Manhattan core (south of Central Park's north edge).
    if lat < 40.786 && lng > -74.02 && lng < -73.93 {
        return DENSE_CELL_DEG;
    }
    // Brownstone Brooklyn / Williamsburg.
    if (40.68..40.73).contains(&lat) && (-73.99..-73.93).contains(&lng) {
        return DENSE_CELL_DEG;
    }
    DEFAULT_CELL_DEG
}

/// Snap a coordinate to its grid cell.
pub fn cell_key(lat: f64, lng: f64) -> CellKey {
    let size = cell_size(lat, lng);
    let cell_lat = (lat / size).round() * size;
    let cell_lng = (lng / size).round() * size;
    CellKey {
        lat_micro: (cell_lat * 1e6).round() as i64,
        lng_micro: (cell_lng * 1e6).round() as i64,
        size_micro: (size * 1e6).round() as i64,
    }
}

/// Planar distance in degrees. Adequate at NYC's scale for the smoothing
/// and clamping radii.
pub fn distance_deg(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let dlat = lat_a - lat_b;
    let dlng = lng_a - lng_b;
    (dlat * dlat + dlng * dlng).sqrt()
}

fn round4(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_cells_in_manhattan_core() {
        assert_eq!(cell_size(40.75, -73.99), DENSE_CELL_DEG);
        assert_eq!(cell_size(40.70, -73.96), DENSE_CELL_DEG);
    }

    #[test]
    fn coarse_cells_elsewhere() {
        // Riverdale, the Rockaways, Staten Island.
        assert_eq!(cell_size(40.89, -73.91), DEFAULT_CELL_DEG);
        assert_eq!(cell_size(40.59, -73.79), DEFAULT_CELL_DEG);
        assert_eq!(cell_size(40.58, -74.15), DEFAULT_CELL_DEG);
    }

    #[test]
    fn nearby_coordinates_share_a_cell() {
        let a = cell_key(40.5900, -73.9100);
        let b = cell_key(40.5905, -73.9105);
        assert_eq!(a, b);
        let far = cell_key(40.6000, -73.9100);
        assert_ne!(a, far);
    }

    #[test]
    fn cell_center_is_rounded_for_output() {
        let key = cell_key(40.7501, -73.9899);
        assert!((key.center_lat() * 1e4).fract().abs() < 1e-9);
        assert!((key.center_lng() * 1e4).fract().abs() < 1e-9);
    }
}
