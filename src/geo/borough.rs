//! Borough assignment.
//!
//! Listings carry a neighborhood name which maps to a borough for the vast
//! majority of records; the remainder fall back to a coarse coordinate
//! classifier. Listings that neither path can place land in `Region::Unknown`
//! and are excluded from the per-borough display stats.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::{Listing, Region};

static NEIGHBORHOOD_INDEX: LazyLock<HashMap<&'static str, Region>> =
    LazyLock::new(|| NEIGHBORHOOD_REGIONS.iter().copied().collect());

/// Assign a region to a listing with known coordinates.
pub fn region_for(listing: &Listing, lat: f64, lng: f64) -> Region {
    if let Some(name) = listing.neighborhood.as_deref() {
        if let Some(region) = NEIGHBORHOOD_INDEX.get(name) {
            return *region;
        }
    }
    region_from_coords(lat, lng)
}

/// Coarse coordinate fallback for neighborhoods missing from the table.
///
/// The boxes are deliberately rough; they only have to be right for the few
/// listings whose neighborhood name is absent or misspelled upstream.
pub fn region_from_coords(lat: f64, lng: f64) -> Region {
    if (-74.03..-73.90).contains(&lng) && (40.70..40.88).contains(&lat) {
        if lng > -73.96 || lat < 40.75 {
            return Region::Manhattan;
        }
    }
    if lat < 40.65 && lng < -74.04 {
        return Region::StatenIsland;
    }
    if lat > 40.80 && lng > -73.94 {
        return Region::Bronx;
    }
    if lat > 40.85 {
        return Region::Bronx;
    }
    if lat < 40.74 {
        if lng < -73.92 {
            return Region::Brooklyn;
        }
        return Region::Queens;
    }
    if lng > -73.92 {
        return Region::Queens;
    }
    Region::Unknown
}

/// Neighborhood-to-borough table, as the scraper spells the names.
pub static NEIGHBORHOOD_REGIONS: &[(&str, Region)] = &[
    ("Battery Park City", Region::Manhattan),
    ("Beekman", Region::Manhattan),
    ("Carnegie Hill", Region::Manhattan),
    ("Central Harlem", Region::Manhattan),
    ("Central Park South", Region::Manhattan),
    ("Chelsea", Region::Manhattan),
    ("Chinatown", Region::Manhattan),
    ("Civic Center", Region::Manhattan),
    ("East Harlem", Region::Manhattan),
    ("East Village", Region::Manhattan),
    ("Financial District", Region::Manhattan),
    ("Flatiron", Region::Manhattan),
    ("Fort George", Region::Manhattan),
    ("Fulton/Seaport", Region::Manhattan),
    ("Gramercy Park", Region::Manhattan),
    ("Greenwich Village", Region::Manhattan),
    ("Hamilton Heights", Region::Manhattan),
    ("Hell's Kitchen", Region::Manhattan),
    ("Hudson Heights", Region::Manhattan),
    ("Hudson Square", Region::Manhattan),
    ("Hudson Yards", Region::Manhattan),
    ("Inwood", Region::Manhattan),
    ("Kips Bay", Region::Manhattan),
    ("Lenox Hill", Region::Manhattan),
    ("Lincoln Square", Region::Manhattan),
    ("Little Italy", Region::Manhattan),
    ("Lower East Side", Region::Manhattan),
    ("Madison", Region::Manhattan),
    ("Manhattan Beach", Region::Brooklyn),
    ("Manhattan Valley", Region::Manhattan),
    ("Manhattanville", Region::Manhattan),
    ("Marble Hill", Region::Manhattan),
    ("Midtown", Region::Manhattan),
    ("Midtown South", Region::Manhattan),
    ("Morningside Heights", Region::Manhattan),
    ("Murray Hill", Region::Manhattan),
    ("NoMad", Region::Manhattan),
    ("Noho", Region::Manhattan),
    ("Nolita", Region::Manhattan),
    ("Roosevelt Island", Region::Manhattan),
    ("Soho", Region::Manhattan),
    ("South Harlem", Region::Manhattan),
    ("Stuyvesant Town/PCV", Region::Manhattan),
    ("Sutton Place", Region::Manhattan),
    ("Tribeca", Region::Manhattan),
    ("Turtle Bay", Region::Manhattan),
    ("Two Bridges", Region::Manhattan),
    ("Upper Carnegie Hill", Region::Manhattan),
    ("Upper East Side", Region::Manhattan),
    ("Upper West Side", Region::Manhattan),
    ("Washington Heights", Region::Manhattan),
    ("West Chelsea", Region::Manhattan),
    ("West Harlem", Region::Manhattan),
    ("West Village", Region::Manhattan),
    ("Yorkville", Region::Manhattan),
    ("Bath Beach", Region::Brooklyn),
    ("Bay Ridge", Region::Brooklyn),
    ("Bedford-Stuyvesant", Region::Brooklyn),
    ("Bensonhurst", Region::Brooklyn),
    ("Bergen Beach", Region::Brooklyn),
    ("Boerum Hill", Region::Brooklyn),
    ("Borough Park", Region::Brooklyn),
    ("Brooklyn Heights", Region::Brooklyn),
    ("Brownsville", Region::Brooklyn),
    ("Bushwick", Region::Brooklyn),
    ("Canarsie", Region::Brooklyn),
    ("Carroll Gardens", Region::Brooklyn),
    ("City Line", Region::Brooklyn),
    ("Clinton Hill", Region::Brooklyn),
    ("Cobble Hill", Region::Brooklyn),
    ("Columbia St Waterfront District", Region::Brooklyn),
    ("Coney Island", Region::Brooklyn),
    ("Crown Heights", Region::Brooklyn),
    ("Cypress Hills", Region::Brooklyn),
    ("DUMBO", Region::Brooklyn),
    ("Ditmars-Steinway", Region::Queens),
    ("Ditmas Park", Region::Brooklyn),
    ("Downtown Brooklyn", Region::Brooklyn),
    ("Dyker Heights", Region::Brooklyn),
    ("East Flatbush", Region::Brooklyn),
    ("East New York", Region::Brooklyn),
    ("East Williamsburg", Region::Brooklyn),
    ("Farragut", Region::Brooklyn),
    ("Fiske Terrace", Region::Brooklyn),
    ("Flatbush", Region::Brooklyn),
    ("Flatlands", Region::Brooklyn),
    ("Fort Greene", Region::Brooklyn),
    ("Fort Hamilton", Region::Brooklyn),
    ("Gowanus", Region::Brooklyn),
    ("Gravesend", Region::Brooklyn),
    ("Greenpoint", Region::Brooklyn),
    ("Greenwood", Region::Brooklyn),
    ("Homecrest", Region::Brooklyn),
    ("Kensington", Region::Brooklyn),
    ("Mapleton", Region::Brooklyn),
    ("Marine Park", Region::Brooklyn),
    ("Midwood", Region::Brooklyn),
    ("Mill Basin", Region::Brooklyn),
    ("New Lots", Region::Brooklyn),
    ("Ocean Hill", Region::Brooklyn),
    ("Park Slope", Region::Brooklyn),
    ("Prospect Heights", Region::Brooklyn),
    ("Prospect Lefferts Gardens", Region::Brooklyn),
    ("Prospect Park South", Region::Brooklyn),
    ("Red Hook", Region::Brooklyn),
    ("Sheepshead Bay", Region::Brooklyn),
    ("Starrett City", Region::Brooklyn),
    ("Stuyvesant Heights", Region::Brooklyn),
    ("Sunset Park", Region::Brooklyn),
    ("Vinegar Hill", Region::Brooklyn),
    ("Weeksville", Region::Brooklyn),
    ("Williamsburg", Region::Brooklyn),
    ("Windsor Terrace", Region::Brooklyn),
    ("Wingate", Region::Brooklyn),
    ("Arverne", Region::Queens),
    ("Astoria", Region::Queens),
    ("Auburndale", Region::Queens),
    ("Bay Terrace", Region::Queens),
    ("Bayside", Region::Queens),
    ("Bayswater", Region::Queens),
    ("Beechhurst", Region::Queens),
    ("Briarwood", Region::Queens),
    ("Brookville", Region::Queens),
    ("College Point", Region::Queens),
    ("Corona", Region::Queens),
    ("Douglaston", Region::Queens),
    ("East Elmhurst", Region::Queens),
    ("East Flushing", Region::Queens),
    ("Elmhurst", Region::Queens),
    ("Far Rockaway", Region::Queens),
    ("Flushing", Region::Queens),
    ("Forest Hills", Region::Queens),
    ("Fresh Meadows", Region::Queens),
    ("Glen Oaks", Region::Queens),
    ("Glendale", Region::Queens),
    ("Hillcrest", Region::Queens),
    ("Hollis", Region::Queens),
    ("Hunters Point", Region::Queens),
    ("Jackson Heights", Region::Queens),
    ("Jamaica", Region::Queens),
    ("Jamaica Estates", Region::Queens),
    ("Jamaica Hills", Region::Queens),
    ("Kew Gardens", Region::Queens),
    ("Kew Gardens Hills", Region::Queens),
    ("Laurelton", Region::Queens),
    ("Lindenwood", Region::Queens),
    ("Little Neck", Region::Queens),
    ("Long Island City", Region::Queens),
    ("Malba", Region::Queens),
    ("Maspeth", Region::Queens),
    ("Middle Village", Region::Queens),
    ("North Corona", Region::Queens),
    ("North New York", Region::Queens),
    ("Oakland Gardens", Region::Queens),
    ("Old Howard Beach", Region::Queens),
    ("Ozone Park", Region::Queens),
    ("Pomonok", Region::Queens),
    ("Queens", Region::Queens),
    ("Queens Village", Region::Queens),
    ("Rego Park", Region::Queens),
    ("Richmond Hill", Region::Queens),
    ("Ridgewood", Region::Queens),
    ("Rockaway Park", Region::Queens),
    ("Rockwood Park", Region::Queens),
    ("Rosedale", Region::Queens),
    ("South Jamaica", Region::Queens),
    ("South Ozone Park", Region::Queens),
    ("Springfield Gardens", Region::Queens),
    ("St. Albans", Region::Queens),
    ("Sunnyside", Region::Queens),
    ("The Rockaways", Region::Queens),
    ("Whitestone", Region::Queens),
    ("Woodhaven", Region::Queens),
    ("Woodside", Region::Queens),
    ("Bedford Park", Region::Bronx),
    ("Belmont", Region::Bronx),
    ("Bronxwood", Region::Bronx),
    ("City Island", Region::Bronx),
    ("Claremont", Region::Bronx),
    ("Concourse", Region::Bronx),
    ("Country Club", Region::Bronx),
    ("Crotona Park East", Region::Bronx),
    ("East Tremont", Region::Bronx),
    ("Fieldston", Region::Bronx),
    ("Fordham", Region::Bronx),
    ("Highbridge", Region::Bronx),
    ("Hunts Point", Region::Bronx),
    ("Kingsbridge", Region::Bronx),
    ("Kingsbridge Heights", Region::Bronx),
    ("Laconia", Region::Bronx),
    ("Locust Point", Region::Bronx),
    ("Longwood", Region::Bronx),
    ("Melrose", Region::Bronx),
    ("Morris Heights", Region::Bronx),
    ("Morris Park", Region::Bronx),
    ("Morrisania", Region::Bronx),
    ("Mott Haven", Region::Bronx),
    ("Mt. Hope", Region::Bronx),
    ("Norwood", Region::Bronx),
    ("Parkchester", Region::Bronx),
    ("Pelham Bay", Region::Bronx),
    ("Pelham Gardens", Region::Bronx),
    ("Pelham Parkway", Region::Bronx),
    ("Riverdale", Region::Bronx),
    ("Schuylerville", Region::Bronx),
    ("Soundview", Region::Bronx),
    ("Spuyten Duyvil", Region::Bronx),
    ("Throgs Neck", Region::Bronx),
    ("Tremont", Region::Bronx),
    ("University Heights", Region::Bronx),
    ("Van Nest", Region::Bronx),
    ("Wakefield", Region::Bronx),
    ("West Farms", Region::Bronx),
    ("Westchester Square", Region::Bronx),
    ("Williamsbridge", Region::Bronx),
    ("Woodstock", Region::Bronx),
    ("Annadale", Region::StatenIsland),
    ("Arden Heights", Region::StatenIsland),
    ("Arrochar", Region::StatenIsland),
    ("Bulls Head", Region::StatenIsland),
    ("Castleton Corners", Region::StatenIsland),
    ("Clifton", Region::StatenIsland),
    ("Dongan Hills", Region::StatenIsland),
    ("Elm Park", Region::StatenIsland),
    ("Eltingville", Region::StatenIsland),
    ("Emerson Hill", Region::StatenIsland),
    ("Grant City", Region::StatenIsland),
    ("Graniteville", Region::StatenIsland),
    ("Grasmere", Region::StatenIsland),
    ("Great Kills", Region::StatenIsland),
    ("Grymes Hill", Region::StatenIsland),
    ("Huguenot", Region::StatenIsland),
    ("Mariners Harbor", Region::StatenIsland),
    ("Meiers Corners", Region::StatenIsland),
    ("Midland Beach", Region::StatenIsland),
    ("New Brighton", Region::StatenIsland),
    ("New Dorp", Region::StatenIsland),
    ("New Dorp Beach", Region::StatenIsland),
    ("New Springville", Region::StatenIsland),
    ("Oakwood", Region::StatenIsland),
    ("Park Hill", Region::StatenIsland),
    ("Port Richmond", Region::StatenIsland),
    ("Princes Bay", Region::StatenIsland),
    ("Ramblersville", Region::Queens),
    ("Richmondtown", Region::StatenIsland),
    ("Rosebank", Region::StatenIsland),
    ("Rossville", Region::StatenIsland),
    ("Saint George", Region::StatenIsland),
    ("Shore Acres", Region::StatenIsland),
    ("Silver Lake", Region::StatenIsland),
    ("South Beach", Region::StatenIsland),
    ("Stapleton", Region::StatenIsland),
    ("Tompkinsville", Region::StatenIsland),
    ("Tottenville", Region::StatenIsland),
    ("West Brighton", Region::StatenIsland),
    ("Westerleigh", Region::StatenIsland),
    ("Willowbrook", Region::StatenIsland),
    ("Woodrow", Region::StatenIsland),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(neighborhood: Option<&str>) -> Listing {
        Listing {
            lat: None,
            lng: None,
            rent: None,
            beds: Some(1),
            property_type: None,
            neighborhood: neighborhood.map(str::to_string),
            rented_date: None,
        }
    }

    #[test]
    fn table_lookup_wins_over_coordinates() {
        // Manhattan Beach is in Brooklyn despite the name; coordinates are
        // deliberately Manhattan-ish to prove the table takes precedence.
        let l = listing(Some("Manhattan Beach"));
        assert_eq!(region_for(&l, 40.77, -73.97), Region::Brooklyn);
    }

    #[test]
    fn coordinate_fallback_for_unknown_names() {
        let l = listing(Some("Atlantis"));
        assert_eq!(region_for(&l, 40.72, -73.99), Region::Manhattan);
        assert_eq!(region_for(&l, 40.63, -73.95), Region::Brooklyn);
        assert_eq!(region_for(&l, 40.76, -73.88), Region::Queens);
        assert_eq!(region_for(&l, 40.86, -73.89), Region::Bronx);
        assert_eq!(region_for(&l, 40.58, -74.15), Region::StatenIsland);
    }

    #[test]
    fn missing_neighborhood_uses_coordinates() {
        let l = listing(None);
        assert_eq!(region_for(&l, 40.72, -73.99), Region::Manhattan);
    }
}
