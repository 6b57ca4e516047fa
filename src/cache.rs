//! Flat-file cache for the canonical moon table. One CSV, overwritten in
//! place on every pipeline run; no versioning, locking, or migration.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{MoonsError, Result};
use crate::types::CanonicalMoon;

fn field_needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row(out: &mut String, cells: &[String]) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        if field_needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

fn opt_cell<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Renders the canonical table as CSV text, header first. Deterministic:
/// identical input always produces byte-identical output.
pub fn to_csv(moons: &[CanonicalMoon]) -> String {
    let mut out = String::new();
    let header: Vec<String> = CanonicalMoon::FIELDS.iter().map(|f| f.to_string()).collect();
    write_row(&mut out, &header);

    for moon in moons {
        let cells = vec![
            moon.name.clone(),
            moon.parent.clone(),
            opt_cell(&moon.numeral),
            opt_cell(&moon.discovery_year),
            opt_cell(&moon.year_announced),
            opt_cell(&moon.mean_radius_km),
            opt_cell(&moon.orbital_semi_km),
            opt_cell(&moon.sidereal_period),
        ];
        write_row(&mut out, &cells);
    }
    out
}

/// Writes the cache file, replacing any previous run's output.
pub fn write_cache(path: &Path, moons: &[CanonicalMoon]) -> Result<()> {
    fs::write(path, to_csv(moons))?;
    info!("Wrote {} moons to {}", moons.len(), path.display());
    Ok(())
}

/// Minimal quote-aware CSV split (double-quote escapes, CRLF tolerant).
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

fn opt_parse<T: std::str::FromStr>(cell: &str) -> Option<T> {
    if cell.is_empty() {
        None
    } else {
        cell.parse().ok()
    }
}

/// Reads a previously written cache file back into the canonical table.
pub fn read_cache(path: &Path) -> Result<Vec<CanonicalMoon>> {
    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text).into_iter();

    let header = rows.next().ok_or_else(|| MoonsError::Cache {
        message: format!("{} is empty", path.display()),
    })?;
    if header != CanonicalMoon::FIELDS {
        return Err(MoonsError::Cache {
            message: format!("unexpected header in {}", path.display()),
        });
    }

    let mut moons = Vec::new();
    for row in rows {
        if row.len() != CanonicalMoon::FIELDS.len() {
            return Err(MoonsError::Cache {
                message: format!("row with {} fields in {}", row.len(), path.display()),
            });
        }
        moons.push(CanonicalMoon {
            name: row[0].clone(),
            parent: row[1].clone(),
            numeral: opt_parse(&row[2]),
            discovery_year: opt_parse(&row[3]),
            year_announced: opt_parse(&row[4]),
            mean_radius_km: opt_parse(&row[5]),
            orbital_semi_km: opt_parse(&row[6]),
            sidereal_period: opt_parse(&row[7]),
        });
    }

    info!("Read {} moons from {}", moons.len(), path.display());
    Ok(moons)
}
