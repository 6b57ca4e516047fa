/// Fixed lookup tables shared by the pipeline and the dashboard.
/// The planet list defines both the row filter set and the sort precedence;
/// the color table is positionally paired with it.
pub const PLANETS: [&str; 8] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

pub const PLANET_COLORS: [&str; 8] = [
    "#8d8d8d", "#d9b700", "#197ad9", "#d64c78", "#d45b00", "#ada6c1", "#6cd9b4", "#3759bf",
];

/// Source page for the moons table
pub const SOURCE_URL: &str = "https://en.wikipedia.org/wiki/List_of_natural_satellites";

/// Default location of the flat-file cache
pub const DEFAULT_CACHE_PATH: &str = "moons.csv";

/// Year of the earliest telescopic moon discovery (the Galilean moons);
/// lower bound of the dashboard's year filter.
pub const FIRST_DISCOVERY_YEAR: i32 = 1610;

/// Position of a planet in solar-distance order, `None` for anything that
/// is not one of the eight recognized planets.
pub fn planet_index(name: &str) -> Option<usize> {
    PLANETS.iter().position(|p| *p == name)
}

/// Chart color for a planet, by the same positional pairing.
pub fn planet_color(name: &str) -> Option<&'static str> {
    planet_index(name).map(|i| PLANET_COLORS[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_order_is_solar_distance_order() {
        assert_eq!(planet_index("Mercury"), Some(0));
        assert_eq!(planet_index("Earth"), Some(2));
        assert_eq!(planet_index("Neptune"), Some(7));
        assert_eq!(planet_index("Pluto"), None);
    }

    #[test]
    fn colors_pair_with_planets() {
        assert_eq!(planet_color("Earth"), Some("#197ad9"));
        assert_eq!(planet_color("Ceres"), None);
    }
}
