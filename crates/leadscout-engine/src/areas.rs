//! Search-area planning.
//!
//! Resolves the configured search scope into an ordered sequence of area
//! identifiers plus the search radius associated with the mode. Single
//! postal codes get tight radii; metro areas sprawl and get a wide one.

use std::io::Read;
use std::path::Path;

use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::AreaError;

/// Radius in meters for postal-code probes in all-areas mode.
pub const ALL_AREAS_RADIUS_M: u32 = 5_000;
/// Radius in meters for caller-selected postal codes.
pub const SPECIFIC_AREAS_RADIUS_M: u32 = 11_265;
/// Radius in meters for metro-area probes.
pub const METRO_RADIUS_M: u32 = 40_000;

/// The configured search scope.
#[derive(Debug, Clone)]
pub enum SearchScope {
    /// Probe the full known postal-code universe in shuffled order.
    AllAreas,
    /// Probe the named metro areas in the given order.
    MetroAreas(Vec<String>),
    /// Probe the given postal codes in the given order.
    SpecificAreas(Vec<String>),
}

/// What kind of identifier the plan's areas are — used for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    PostalCode,
    MetroArea,
}

impl AreaKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AreaKind::PostalCode => "postal code",
            AreaKind::MetroArea => "metro area",
        }
    }
}

/// An executable probe sequence: ordered area identifiers and the radius
/// to search around each.
#[derive(Debug, Clone)]
pub struct AreaPlan {
    pub areas: Vec<String>,
    pub radius_m: u32,
    pub kind: AreaKind,
}

/// Resolves a scope into an [`AreaPlan`].
///
/// `AllAreas` shuffles freshly each run (no fixed seed) so the result
/// budget is not spent on the same early postal codes every time.
///
/// # Errors
///
/// Returns [`AreaError::ZipListUnavailable`] when `AllAreas` is requested
/// with an empty `all_zips`, and [`AreaError::EmptySelection`] when a
/// selection mode has no areas — these refuse the run before it starts.
pub fn plan_areas(scope: SearchScope, all_zips: &[String]) -> Result<AreaPlan, AreaError> {
    match scope {
        SearchScope::AllAreas => {
            if all_zips.is_empty() {
                return Err(AreaError::ZipListUnavailable);
            }
            let mut areas = all_zips.to_vec();
            areas.shuffle(&mut rand::rng());
            Ok(AreaPlan {
                areas,
                radius_m: ALL_AREAS_RADIUS_M,
                kind: AreaKind::PostalCode,
            })
        }
        SearchScope::MetroAreas(metros) => {
            if metros.is_empty() {
                return Err(AreaError::EmptySelection { mode: "metro-area" });
            }
            Ok(AreaPlan {
                areas: metros,
                radius_m: METRO_RADIUS_M,
                kind: AreaKind::MetroArea,
            })
        }
        SearchScope::SpecificAreas(zips) => {
            if zips.is_empty() {
                return Err(AreaError::EmptySelection {
                    mode: "postal-code",
                });
            }
            Ok(AreaPlan {
                areas: zips,
                radius_m: SPECIFIC_AREAS_RADIUS_M,
                kind: AreaKind::PostalCode,
            })
        }
    }
}

/// Loads the postal-code universe from a CSV file with a `zipcode` column.
///
/// Soft-fails to an empty list when the file is missing or unreadable —
/// which in turn makes only the all-areas mode unavailable.
#[must_use]
pub fn load_zip_list(path: &Path) -> Vec<String> {
    match std::fs::File::open(path) {
        Ok(file) => zip_list_from_reader(file),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "postal-code list unavailable — all-areas search is disabled"
            );
            Vec::new()
        }
    }
}

/// Parses a `zipcode`-column CSV into a sorted list. Malformed rows are
/// skipped.
pub fn zip_list_from_reader<R: Read>(reader: R) -> Vec<String> {
    #[derive(Debug, Deserialize)]
    struct ZipRow {
        zipcode: String,
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut zips: Vec<String> = csv_reader
        .deserialize::<ZipRow>()
        .filter_map(|row| match row {
            Ok(row) => {
                let zip = row.zipcode.trim().to_owned();
                (!zip.is_empty()).then_some(zip)
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed postal-code row");
                None
            }
        })
        .collect();
    zips.sort();
    zips
}

/// The top U.S. metro areas offered for metro-mode search, sorted.
pub const TOP_100_METROS: &[&str] = &[
    "Akron, OH",
    "Albany-Schenectady-Troy, NY",
    "Albuquerque, NM",
    "Allentown-Bethlehem-Easton, PA-NJ",
    "Atlanta-Sandy Springs-Alpharetta, GA",
    "Augusta-Richmond County, GA-SC",
    "Austin-Round Rock-Georgetown, TX",
    "Bakersfield, CA",
    "Baltimore-Columbia-Towson, MD",
    "Baton Rouge, LA",
    "Birmingham-Hoover, AL",
    "Boise City, ID",
    "Boston-Cambridge-Newton, MA-NH",
    "Bridgeport-Stamford-Norwalk, CT",
    "Buffalo-Cheektowaga, NY",
    "Cape Coral-Fort Myers, FL",
    "Charleston-North Charleston, SC",
    "Charlotte-Concord-Gastonia, NC-SC",
    "Chattanooga, TN-GA",
    "Chicago-Naperville-Elgin, IL-IN-WI",
    "Cincinnati, OH-KY-IN",
    "Cleveland-Elyria, OH",
    "Colorado Springs, CO",
    "Columbia, SC",
    "Columbus, OH",
    "Concord, NC",
    "Dallas-Fort Worth-Arlington, TX",
    "Dayton-Kettering, OH",
    "Denver-Aurora-Lakewood, CO",
    "Des Moines-West Des Moines, IA",
    "Detroit-Warren-Dearborn, MI",
    "El Paso, TX",
    "Fresno, CA",
    "Grand Rapids-Kentwood, MI",
    "Greensboro-High Point, NC",
    "Greenville-Anderson, SC",
    "Harrisburg-Carlisle, PA",
    "Hartford-East Hartford-Middletown, CT",
    "Houston-The Woodlands-Sugar Land, TX",
    "Indianapolis-Carmel-Anderson, IN",
    "Jackson, MS",
    "Jacksonville, FL",
    "Kansas City, MO-KS",
    "Knoxville, TN",
    "Lakeland-Winter Haven, FL",
    "Lansing-East Lansing, MI",
    "Las Vegas-Henderson-Paradise, NV",
    "Little Rock-North Little Rock-Conway, AR",
    "Los Angeles-Long Beach-Anaheim, CA",
    "Louisville/Jefferson County, KY-IN",
    "Madison, WI",
    "McAllen-Edinburg-Mission, TX",
    "Memphis, TN-MS-AR",
    "Miami-Fort Lauderdale-Pompano Beach, FL",
    "Milwaukee-Waukesha, WI",
    "Minneapolis-St. Paul-Bloomington, MN-WI",
    "Nashville-Davidson–Murfreesboro–Franklin, TN",
    "New Haven-Milford, CT",
    "New Orleans-Metairie, LA",
    "New York-Newark-Jersey City, NY-NJ-PA",
    "Ogden-Clearfield, UT",
    "Oklahoma City, OK",
    "Omaha-Council Bluffs, NE-IA",
    "Orlando-Kissimmee-Sanford, FL",
    "Oxnard-Thousand Oaks-Ventura, CA",
    "Palm Bay-Melbourne-Titusville, FL",
    "Philadelphia-Camden-Wilmington, PA-NJ-DE-MD",
    "Phoenix-Mesa-Chandler, AZ",
    "Pittsburgh, PA",
    "Portland-Vancouver-Hillsboro, OR-WA",
    "Poughkeepsie-Newburgh-Middletown, NY",
    "Providence-Warwick, RI-MA",
    "Provo-Orem, UT",
    "Raleigh-Cary, NC",
    "Richmond, VA",
    "Riverside-San Bernardino-Ontario, CA",
    "Rochester, NY",
    "Sacramento-Roseville-Folsom, CA",
    "Salt Lake City, UT",
    "San Antonio-New Braunfels, TX",
    "San Diego-Chula Vista-Carlsbad, CA",
    "San Francisco-Oakland-Berkeley, CA",
    "San Jose-Sunnyvale-Santa Clara, CA",
    "Scranton–Wilkes-Barre, PA",
    "Seattle-Tacoma-Bellevue, WA",
    "Springfield, MA",
    "St. Louis, MO-IL",
    "Stockton, CA",
    "Syracuse, NY",
    "Tampa-St. Petersburg-Clearwater, FL",
    "Toledo, OH",
    "Tucson, AZ",
    "Tulsa, OK",
    "Urban Honolulu, HI",
    "Virginia Beach-Norfolk-Newport News, VA-NC",
    "Washington-Arlington-Alexandria, DC-VA-MD-WV",
    "Wichita, KS",
    "Winston-Salem, NC",
    "Worcester, MA-CT",
];
