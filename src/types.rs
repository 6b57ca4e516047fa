use serde::{Deserialize, Serialize};

/// One row of the scraped moons table, still free text. Decorative columns
/// (the image column) and reference footnotes are dropped by the table
/// parser and never reach this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMoonRow {
    pub name: String,
    pub parent: String,
    pub numeral: String,
    pub discovery_year: String,
    pub year_announced: String,
    pub mean_radius: String,
    pub orbital_semi_major_axis: String,
    pub sidereal_period: String,
}

/// A cleaned, typed moon record. Absent fields are parse misses, not errors;
/// Earth's moon carries `discovery_year = Some(0)` by convention so it sorts
/// before every telescopic discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMoon {
    pub name: String,
    pub parent: String,
    pub numeral: Option<u32>,
    pub discovery_year: Option<i32>,
    pub year_announced: Option<i32>,
    pub mean_radius_km: Option<f64>,
    pub orbital_semi_km: Option<f64>,
    pub sidereal_period: Option<f64>,
}

impl CanonicalMoon {
    /// Field names of the cache file header, in column order.
    pub const FIELDS: [&'static str; 8] = [
        "name",
        "parent",
        "numeral",
        "discovery_year",
        "year_announced",
        "mean_radius_km",
        "orbital_semi_km",
        "sidereal_period",
    ];
}
