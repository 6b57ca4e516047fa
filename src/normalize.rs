use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::types::{CanonicalMoon, RawMoonRow};

/// First decimal number in a dirty text field: either comma-grouped
/// thousands ("1,737.4") or a plain digit run ("1737.4"), with an optional
/// fractional part. The plain-run alternative keeps extraction idempotent:
/// a value the pipeline already cleaned re-extracts to itself.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?").unwrap());

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Pulls the first number out of a field that mixes the value with units,
/// footnotes, thousands separators, or a retrograde marker. No match means
/// the field is absent, never an error.
pub fn extract_number(text: &str) -> Option<f64> {
    let m = NUMBER_RE.find(text)?;
    m.as_str().replace(',', "").parse().ok()
}

/// First bare digit run, for the numeral column ("3 (third)" -> 3, "I" -> none).
pub fn extract_integer(text: &str) -> Option<u32> {
    let m = DIGITS_RE.find(text)?;
    m.as_str().parse().ok()
}

/// Whole-field year parse. Unlike the dirty numeric fields, a year cell is
/// either a plain integer or unusable ("N/A", em dashes, annotated text).
fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

fn clean_row(row: &RawMoonRow) -> CanonicalMoon {
    CanonicalMoon {
        name: row.name.trim().to_string(),
        parent: row.parent.trim().to_string(),
        numeral: extract_integer(&row.numeral),
        discovery_year: parse_year(&row.discovery_year),
        year_announced: parse_year(&row.year_announced),
        mean_radius_km: extract_number(&row.mean_radius),
        orbital_semi_km: extract_number(&row.orbital_semi_major_axis),
        sidereal_period: extract_number(&row.sidereal_period),
    }
}

/// Turns the raw scraped table into the canonical moon dataset.
///
/// Rows whose parent is not in `planets` are dropped (this also removes
/// header and subtotal artifacts from the scrape). Field-level parse misses
/// degrade to absent values and never drop a row. Earth's moon gets
/// `discovery_year = 0` regardless of the scraped text. Output is grouped
/// by parent in the order of `planets` and by ascending numeral within a
/// group; moons with no parseable numeral sort last in their group.
pub fn normalize(rows: &[RawMoonRow], planets: &[&str]) -> Vec<CanonicalMoon> {
    let total = rows.len();

    let mut moons: Vec<CanonicalMoon> = rows
        .iter()
        .map(clean_row)
        .filter(|m| planets.contains(&m.parent.as_str()))
        .map(|mut m| {
            if m.parent == "Earth" {
                m.discovery_year = Some(0);
            }
            m
        })
        .collect();

    // Transient sort key only; None numerals order after any Some(n).
    moons.sort_by_key(|m| {
        (
            planets.iter().position(|p| *p == m.parent),
            m.numeral.is_none(),
            m.numeral,
        )
    });

    info!(
        total_rows = total,
        kept = moons.len(),
        dropped = total - moons.len(),
        "normalized moons table"
    );

    moons
}

/// `normalize` against the canonical eight-planet list.
pub fn normalize_moons(rows: &[RawMoonRow]) -> Vec<CanonicalMoon> {
    normalize(rows, &crate::constants::PLANETS)
}
