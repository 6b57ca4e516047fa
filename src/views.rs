//! Derived dashboard views. Each view is a pure function over the canonical
//! table and a filter state; the server recomputes them per request and
//! never mutates the dataset.

use serde::Serialize;

use crate::constants::{planet_color, PLANETS};
use crate::types::CanonicalMoon;

/// Moons known for one planet at the selected year, with its chart color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetCount {
    pub parent: String,
    pub count: usize,
    pub color: String,
}

/// Running total of moons discovered by the end of a given year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub total: usize,
}

fn discovered_by(moon: &CanonicalMoon, year: i32) -> bool {
    matches!(moon.discovery_year, Some(y) if y <= year)
}

/// Counts moons with `discovery_year <= year` per parent, reported in
/// solar-distance order. Planets with nothing discovered yet are omitted,
/// matching how the charts only show planets present in the filtered data.
pub fn moon_counts(moons: &[CanonicalMoon], year: i32) -> Vec<PlanetCount> {
    PLANETS
        .iter()
        .filter_map(|planet| {
            let count = moons
                .iter()
                .filter(|m| m.parent == *planet && discovered_by(m, year))
                .count();
            if count == 0 {
                return None;
            }
            Some(PlanetCount {
                parent: (*planet).to_string(),
                count,
                color: planet_color(planet).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Distinct discovery years ascending, each with the cumulative number of
/// moons discovered by then. Rows with no discovery year are excluded.
pub fn cumulative_counts(moons: &[CanonicalMoon]) -> Vec<YearCount> {
    let mut years: Vec<i32> = moons.iter().filter_map(|m| m.discovery_year).collect();
    years.sort_unstable();

    let mut out: Vec<YearCount> = Vec::new();
    for year in years {
        match out.last_mut() {
            Some(last) if last.year == year => last.total += 1,
            _ => {
                let prev = out.last().map(|c| c.total).unwrap_or(0);
                out.push(YearCount {
                    year,
                    total: prev + 1,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon(name: &str, parent: &str, discovery_year: Option<i32>) -> CanonicalMoon {
        CanonicalMoon {
            name: name.to_string(),
            parent: parent.to_string(),
            numeral: None,
            discovery_year,
            year_announced: None,
            mean_radius_km: None,
            orbital_semi_km: None,
            sidereal_period: None,
        }
    }

    fn dataset() -> Vec<CanonicalMoon> {
        vec![
            moon("Moon", "Earth", Some(0)),
            moon("Io", "Jupiter", Some(1610)),
            moon("Europa", "Jupiter", Some(1610)),
            moon("Titan", "Saturn", Some(1655)),
            moon("S/2023 U 1", "Uranus", Some(2023)),
            moon("Unknown", "Neptune", None),
        ]
    }

    #[test]
    fn counts_respect_the_year_cutoff() {
        let counts = moon_counts(&dataset(), 1610);
        let as_pairs: Vec<(&str, usize)> =
            counts.iter().map(|c| (c.parent.as_str(), c.count)).collect();
        assert_eq!(as_pairs, vec![("Earth", 1), ("Jupiter", 2)]);
    }

    #[test]
    fn counts_come_in_solar_order_with_colors() {
        let counts = moon_counts(&dataset(), 2100);
        let parents: Vec<&str> = counts.iter().map(|c| c.parent.as_str()).collect();
        assert_eq!(parents, vec!["Earth", "Jupiter", "Saturn", "Uranus"]);
        assert_eq!(counts[0].color, "#197ad9");
    }

    #[test]
    fn moons_without_a_year_never_count() {
        let counts = moon_counts(&dataset(), 2100);
        assert!(counts.iter().all(|c| c.parent != "Neptune"));
    }

    #[test]
    fn cumulative_totals_accumulate_per_distinct_year() {
        let series = cumulative_counts(&dataset());
        let as_pairs: Vec<(i32, usize)> = series.iter().map(|c| (c.year, c.total)).collect();
        assert_eq!(as_pairs, vec![(0, 1), (1610, 3), (1655, 4), (2023, 5)]);
    }

    #[test]
    fn empty_dataset_yields_empty_views() {
        assert!(moon_counts(&[], 2100).is_empty());
        assert!(cumulative_counts(&[]).is_empty());
    }
}
