use anyhow::Result;
use moondash::cache::{read_cache, to_csv, write_cache};
use moondash::normalize::normalize_moons;
use moondash::scrape::parse_moons_table;
use tempfile::tempdir;

/// A trimmed rendition of the source page: a lead-in table, the moons table
/// with the real column set (including the decorative image column and the
/// references column), and a trailing table.
const PAGE: &str = r#"
<html><body>
<table class="wikitable"><tr><th>Planets</th></tr><tr><td>ignored</td></tr></table>
<table class="wikitable">
  <tr>
    <th>Image</th><th>Name</th><th>Numeral</th><th>Parent</th>
    <th>Mean radius (km)[4]</th><th>Orbital semi-major axis (km)[5]</th>
    <th>Sidereal period (d) (r = retrograde)</th>
    <th>Discovery year</th><th>Year announced</th><th>Ref(s)</th>
  </tr>
  <tr>
    <td><img src="io.jpg"/></td><th>Io</th><td>1</td><td>Jupiter</td>
    <td>1,821.6</td><td>421,700</td><td>1.77</td><td>1610</td><td>1610</td><td>[7]</td>
  </tr>
  <tr>
    <td><img src="moon.jpg"/></td><th>Moon</th><td>-</td><td>Earth</td>
    <td>1,737.4 km</td><td>384,399</td><td>27.32</td><td>N/A</td><td>N/A</td><td>[6]</td>
  </tr>
  <tr>
    <td></td><th>Charon</th><td>1</td><td>Pluto</td>
    <td>606</td><td>19,591</td><td>6.39</td><td>1978</td><td>1978</td><td>[8]</td>
  </tr>
  <tr>
    <td></td><th>Phobos</th><td>1</td><td>Mars</td>
    <td>11.08</td><td>9,376</td><td>0.319</td><td>1877</td><td>1877</td><td>[9]</td>
  </tr>
</table>
<table class="wikitable"><tr><th>Footer</th></tr><tr><td>ignored</td></tr></table>
</body></html>"#;

#[test]
fn raw_page_to_cache_file_and_back() -> Result<()> {
    let raw_rows = parse_moons_table(PAGE)?;
    assert_eq!(raw_rows.len(), 4);

    let moons = normalize_moons(&raw_rows);

    // Pluto's moon is excluded; everything else survives.
    let names: Vec<&str> = moons.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Moon", "Phobos", "Io"]);

    // Earth's moon sorts first with the forced discovery year.
    assert_eq!(moons[0].parent, "Earth");
    assert_eq!(moons[0].discovery_year, Some(0));
    assert_eq!(moons[0].numeral, None);
    assert_eq!(moons[0].mean_radius_km, Some(1737.4));

    assert_eq!(moons[2].parent, "Jupiter");
    assert_eq!(moons[2].discovery_year, Some(1610));
    assert_eq!(moons[2].orbital_semi_km, Some(421_700.0));

    // The cache round-trips exactly.
    let dir = tempdir()?;
    let path = dir.path().join("moons.csv");
    write_cache(&path, &moons)?;
    let restored = read_cache(&path)?;
    assert_eq!(restored, moons);

    Ok(())
}

#[test]
fn identical_input_yields_byte_identical_output() -> Result<()> {
    let first = to_csv(&normalize_moons(&parse_moons_table(PAGE)?));
    let second = to_csv(&normalize_moons(&parse_moons_table(PAGE)?));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn normalizing_restored_output_is_a_fixed_point() -> Result<()> {
    // Re-running extraction over already-clean values must not change them.
    let moons = normalize_moons(&parse_moons_table(PAGE)?);

    let dir = tempdir()?;
    let path = dir.path().join("moons.csv");
    write_cache(&path, &moons)?;
    let restored = read_cache(&path)?;

    for (before, after) in moons.iter().zip(&restored) {
        assert_eq!(
            before.mean_radius_km,
            after
                .mean_radius_km
                .map(|v| moondash::normalize::extract_number(&v.to_string()).unwrap()),
        );
    }
    Ok(())
}
