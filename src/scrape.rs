use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::constants::SOURCE_URL;
use crate::error::{MoonsError, Result};
use crate::types::RawMoonRow;

/// Columns the normalizer needs, keyed by cleaned-header prefix. The image
/// column and the references column are simply never mapped, which drops
/// them at the parse boundary.
const REQUIRED_COLUMNS: [&str; 8] = [
    "name",
    "parent",
    "numeral",
    "discovery_year",
    "year_announced",
    "mean_radius",
    "orbital_semi_major_axis",
    "sidereal_period",
];

pub struct WikipediaMoonsSource {
    client: reqwest::Client,
}

impl WikipediaMoonsSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the source page and parses the moons table into raw rows.
    /// The single request has no retry policy; a failure aborts the run.
    pub async fn fetch_raw_rows(&self) -> Result<Vec<RawMoonRow>> {
        info!("Fetching moons table from {}", SOURCE_URL);

        let body = self
            .client
            .get(SOURCE_URL)
            .header("User-Agent", "moondash/0.1 (moons dataset scraper)")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let rows = parse_moons_table(&body)?;
        info!("Parsed {} raw rows from the moons table", rows.len());
        if rows.is_empty() {
            warn!("No rows found - the page structure may have changed");
        }
        Ok(rows)
    }
}

impl Default for WikipediaMoonsSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a header cell into an identifier: lowercase, footnote markers
/// stripped, non-alphanumeric runs collapsed to a single underscore.
/// "Mean radius (km)[4]" becomes "mean_radius_km".
pub fn clean_name(header: &str) -> String {
    let mut cleaned = String::with_capacity(header.len());
    let mut in_bracket = false;
    let mut last_underscore = true;

    for ch in header.trim().chars() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if in_bracket => {}
            c if c.is_alphanumeric() => {
                cleaned.extend(c.to_lowercase());
                last_underscore = false;
            }
            _ => {
                if !last_underscore {
                    cleaned.push('_');
                    last_underscore = true;
                }
            }
        }
    }

    cleaned.trim_end_matches('_').to_string()
}

fn cell_texts(row: ElementRef) -> Vec<String> {
    let cell_selector = Selector::parse("th, td").unwrap();
    row.select(&cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

/// Parses the moons table out of the page HTML. The source page carries
/// several wikitables; the moons list is the second-to-last one, matching
/// how the original dataset was built.
pub fn parse_moons_table(html: &str) -> Result<Vec<RawMoonRow>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table.wikitable").unwrap();
    let row_selector = Selector::parse("tr").unwrap();

    let tables: Vec<ElementRef> = document.select(&table_selector).collect();
    if tables.len() < 2 {
        return Err(MoonsError::TableNotFound(format!(
            "expected at least 2 wikitables, found {}",
            tables.len()
        )));
    }
    let table = tables[tables.len() - 2];

    let mut rows = table.select(&row_selector);
    let header_row = rows
        .next()
        .ok_or_else(|| MoonsError::TableNotFound("moons table has no header row".into()))?;

    let headers: Vec<String> = cell_texts(header_row).iter().map(|h| clean_name(h)).collect();

    // Resolve each required column to its position by cleaned-name prefix;
    // unmapped columns (image, references) are pruned here.
    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, wanted) in REQUIRED_COLUMNS.iter().enumerate() {
        let found = headers.iter().position(|h| h.starts_with(wanted));
        match found {
            Some(idx) => positions[slot] = idx,
            None => return Err(MoonsError::MissingColumn((*wanted).to_string())),
        }
    }

    let get = |cells: &[String], slot: usize| -> String {
        cells.get(positions[slot]).cloned().unwrap_or_default()
    };

    let mut raw_rows = Vec::new();
    for row in rows {
        let cells = cell_texts(row);
        if cells.is_empty() {
            continue;
        }
        raw_rows.push(RawMoonRow {
            name: get(&cells, 0),
            parent: get(&cells, 1),
            numeral: get(&cells, 2),
            discovery_year: get(&cells, 3),
            year_announced: get(&cells, 4),
            mean_radius: get(&cells, 5),
            orbital_semi_major_axis: get(&cells, 6),
            sidereal_period: get(&cells, 7),
        });
    }

    Ok(raw_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
<html><body>
<table class="wikitable"><tr><th>Summary</th></tr><tr><td>ignored</td></tr></table>
<table class="wikitable">
  <tr>
    <th>Image</th><th>Name</th><th>Numeral</th><th>Parent</th>
    <th>Mean radius (km)[4]</th><th>Orbital semi-major axis (km)[5]</th>
    <th>Sidereal period (d) (r = retrograde)</th>
    <th>Discovery year</th><th>Year announced</th><th>Ref(s)</th>
  </tr>
  <tr>
    <td><img src="moon.jpg"/></td><th>Moon</th><td>I</td><td>Earth</td>
    <td>1,737.4</td><td>384,399</td><td>27.32</td>
    <td>N/A</td><td>N/A</td><td>[6]</td>
  </tr>
  <tr>
    <td></td><th>Io</th><td>1</td><td>Jupiter</td>
    <td>1,821.6</td><td>421,700</td><td>1.77</td>
    <td>1610</td><td>1610</td><td>[7]</td>
  </tr>
</table>
<table class="wikitable"><tr><th>Footer</th></tr><tr><td>ignored</td></tr></table>
</body></html>"#;

    #[test]
    fn cleans_header_names() {
        assert_eq!(clean_name("Mean radius (km)[4]"), "mean_radius_km");
        assert_eq!(clean_name("Discovery year"), "discovery_year");
        assert_eq!(
            clean_name("Sidereal period (d) (r = retrograde)"),
            "sidereal_period_d_r_retrograde"
        );
        assert_eq!(clean_name("Ref(s)"), "ref_s");
    }

    #[test]
    fn parses_second_to_last_wikitable() {
        let rows = parse_moons_table(FIXTURE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Moon");
        assert_eq!(rows[0].parent, "Earth");
        assert_eq!(rows[0].mean_radius, "1,737.4");
        assert_eq!(rows[1].name, "Io");
        assert_eq!(rows[1].sidereal_period, "1.77");
    }

    #[test]
    fn missing_column_is_an_error() {
        let html = r#"<table class="wikitable"><tr><th>a</th></tr></table>
                      <table class="wikitable"><tr><th>Name</th></tr></table>
                      <table class="wikitable"><tr><th>b</th></tr></table>"#;
        let err = parse_moons_table(html).unwrap_err();
        assert!(matches!(err, MoonsError::MissingColumn(_)));
    }

    #[test]
    fn too_few_tables_is_an_error() {
        let err = parse_moons_table("<p>no tables here</p>").unwrap_err();
        assert!(matches!(err, MoonsError::TableNotFound(_)));
    }
}
