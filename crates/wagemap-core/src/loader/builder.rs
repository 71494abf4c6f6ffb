// crates/wagemap-core/src/loader/builder.rs
#![cfg(feature = "builder")]

//! Regenerates the four JSON tables from the OFLC wage-data export
//! (`Geography.csv`, `oes_soc_occs.csv`, `ALC_Export.csv`).

use super::common_io::{self, open_error};
use super::{DataPaths, Table};
use crate::error::{Result, WageError};
use crate::model::{CountyRaw, GeographyRaw, OccupationRaw, OrderedTable, RawTables};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// 40 hours/week * 52 weeks.
pub const HOURS_PER_YEAR: f64 = 2080.0;

/// Occupations kept, ranked by how many areas publish wages for them.
pub const DEFAULT_TOP_OCCUPATIONS: usize = 100;

pub const GEOGRAPHY_CSV: &str = "Geography.csv";
pub const OCCUPATIONS_CSV: &str = "oes_soc_occs.csv";
pub const WAGES_CSV: &str = "ALC_Export.csv";

#[derive(Debug, Deserialize)]
struct GeographyRow {
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "AreaName")]
    area_name: String,
    #[serde(rename = "StateAb")]
    state: String,
    #[serde(rename = "CountyTownName")]
    county: String,
}

#[derive(Debug, Deserialize)]
struct OccupationRow {
    #[serde(rename = "soccode")]
    code: String,
    #[serde(rename = "Title")]
    title: String,
}

#[derive(Debug, Deserialize)]
struct WageRow {
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "SocCode")]
    soc: String,
    #[serde(rename = "Level1", default)]
    level1: Option<String>,
    #[serde(rename = "Level2", default)]
    level2: Option<String>,
    #[serde(rename = "Level3", default)]
    level3: Option<String>,
    #[serde(rename = "Level4", default)]
    level4: Option<String>,
}

impl WageRow {
    /// Annualised levels, or `None` if any level is missing or not a number.
    fn annual_levels(&self) -> Option<[u64; 4]> {
        let mut out = [0u64; 4];
        for (slot, raw) in out
            .iter_mut()
            .zip([&self.level1, &self.level2, &self.level3, &self.level4])
        {
            *slot = annualize(raw.as_deref()?)?;
        }
        Some(out)
    }
}

/// Hourly rate to whole annual dollars, rounding half to even.
pub fn annualize(hourly: &str) -> Option<u64> {
    let rate: f64 = hourly.trim().parse().ok()?;
    if !rate.is_finite() || rate < 0.0 {
        return None;
    }
    Some((rate * HOURS_PER_YEAR).round_ties_even() as u64)
}

/// Insertion-ordered map: updates keep the key's first position.
struct OrderedIndex<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> OrderedIndex<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn get_or_insert_with(&mut self, key: &str, f: impl FnOnce() -> T) -> &mut T {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), f()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Insert or replace; returns the replaced value.
    fn upsert(&mut self, key: &str, value: T) -> Option<T> {
        match self.index.get(key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
                None
            }
        }
    }

    fn into_table(self) -> OrderedTable<T> {
        OrderedTable(self.entries)
    }
}

// -----------------------------------------------------------------------------
// BUILDER
// -----------------------------------------------------------------------------

/// Build the tables from the three CSV files inside `source_dir`.
pub fn build_tables(source_dir: &Path, top_n: usize) -> Result<RawTables> {
    let open = |name: &str| -> Result<File> {
        let path = source_dir.join(name);
        File::open(&path).map_err(|e| open_error(name, &path, e))
    };
    log::info!("building tables from {} (top {top_n} occupations)", source_dir.display());
    build_from_readers(open(GEOGRAPHY_CSV)?, open(OCCUPATIONS_CSV)?, open(WAGES_CSV)?, top_n)
}

/// Build the tables from CSV readers.
pub fn build_from_readers<G: Read, O: Read, W: Read>(
    geography_csv: G,
    occupations_csv: O,
    wages_csv: W,
    top_n: usize,
) -> Result<RawTables> {
    let geography = read_geography(geography_csv)?;
    let titles = read_titles(occupations_csv)?;
    let wages = read_wages(wages_csv)?;
    log::info!(
        "read {} areas, {} occupation titles, wages for {} areas",
        geography.entries.len(),
        titles.len(),
        wages.entries.len()
    );

    let selected = top_occupations(&wages, top_n);
    let selected_set: HashSet<&str> = selected.iter().map(String::as_str).collect();

    let mut wage_table = OrderedTable::new();
    for (area, by_soc) in &wages.entries {
        let kept: BTreeMap<String, [u64; 4]> = by_soc
            .entries
            .iter()
            .filter(|(soc, _)| selected_set.contains(soc.as_str()))
            .map(|(soc, levels)| (soc.clone(), *levels))
            .collect();
        if !kept.is_empty() {
            wage_table.push(area.clone(), kept);
        }
    }

    let counties = county_index(&geography);
    let occupations = selected
        .iter()
        .filter_map(|code| {
            titles.get(code).map(|title| OccupationRaw {
                code: code.clone(),
                title: title.clone(),
            })
        })
        .collect();

    Ok(RawTables {
        wages: wage_table,
        geography: geography.into_table(),
        counties,
        occupations,
    })
}

fn read_geography<R: Read>(reader: R) -> Result<OrderedIndex<GeographyRaw>> {
    let mut areas = OrderedIndex::new();
    for row in csv::Reader::from_reader(reader).deserialize() {
        let row: GeographyRow = row?;
        let area = areas.get_or_insert_with(&row.area, || GeographyRaw {
            area_name: row.area_name.clone(),
            state: row.state.clone(),
            counties: Vec::new(),
        });
        // A county listed twice for one area is kept once.
        if !area.counties.contains(&row.county) {
            area.counties.push(row.county);
        }
    }
    Ok(areas)
}

fn read_titles<R: Read>(reader: R) -> Result<HashMap<String, String>> {
    let mut titles = HashMap::new();
    for row in csv::Reader::from_reader(reader).deserialize() {
        let row: OccupationRow = row?;
        titles.insert(row.code, row.title);
    }
    Ok(titles)
}

fn read_wages<R: Read>(reader: R) -> Result<OrderedIndex<OrderedIndex<[u64; 4]>>> {
    let mut wages = OrderedIndex::new();
    let mut skipped = 0usize;
    for row in csv::Reader::from_reader(reader).deserialize() {
        let row: WageRow = row?;
        let Some(levels) = row.annual_levels() else {
            log::debug!("skipping wage row {} / {}: unusable levels", row.area, row.soc);
            skipped += 1;
            continue;
        };
        wages
            .get_or_insert_with(&row.area, OrderedIndex::new)
            .upsert(&row.soc, levels);
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} wage rows with missing or invalid levels");
    }
    Ok(wages)
}

/// The `n` occupation codes published in the most areas; ties keep
/// first-seen order.
fn top_occupations(wages: &OrderedIndex<OrderedIndex<[u64; 4]>>, n: usize) -> Vec<String> {
    let mut counts: OrderedIndex<usize> = OrderedIndex::new();
    for (_, by_soc) in &wages.entries {
        for (soc, _) in &by_soc.entries {
            *counts.get_or_insert_with(soc, || 0) += 1;
        }
    }
    let mut ranked = counts.entries;
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(soc, _)| soc).collect()
}

/// `"County, ST"` -> directory entry. A key listed by two areas takes the
/// later area's value but keeps its first position.
fn county_index(geography: &OrderedIndex<GeographyRaw>) -> OrderedTable<CountyRaw> {
    let mut index = OrderedIndex::new();
    for (area, g) in &geography.entries {
        for county in &g.counties {
            let key = format!("{county}, {}", g.state);
            let entry = CountyRaw {
                area: area.clone(),
                area_name: g.area_name.clone(),
                state: g.state.clone(),
                county: county.clone(),
            };
            if let Some(previous) = index.upsert(&key, entry) {
                if previous.area != *area {
                    log::warn!("{key} listed under areas {} and {area}; keeping {area}", previous.area);
                }
            }
        }
    }
    index.into_table()
}

// -----------------------------------------------------------------------------
// WRITER
// -----------------------------------------------------------------------------

/// Write the four tables to `paths`; occupations are pretty-printed, the
/// rest compact. `.gz` file names are gzip-compressed.
pub fn write_tables(paths: &DataPaths, tables: &RawTables) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&paths.dir).map_err(WageError::Io)?;
    let mut written = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        let bytes = match table {
            Table::Wages => compact(&tables.wages)?,
            Table::Geography => compact(&tables.geography)?,
            Table::Counties => compact(&tables.counties)?,
            Table::Occupations => serde_json::to_vec_pretty(&tables.occupations)?,
        };
        let path = paths.path_for(table);
        let bytes = common_io::maybe_gzip(&path, bytes)?;
        fs::write(&path, &bytes).map_err(WageError::Io)?;
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }
    Ok(written)
}

fn compact<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOGRAPHY: &str = "\
Area,AreaName,StateAb,CountyTownName
41860,\"San Francisco-Oakland-Hayward, CA\",CA,San Francisco County
41860,\"San Francisco-Oakland-Hayward, CA\",CA,Marin County
41860,\"San Francisco-Oakland-Hayward, CA\",CA,Marin County
41940,\"San Jose-Sunnyvale-Santa Clara, CA\",CA,Santa Clara County
9999901,Balance of Nowhere,CA,Marin County
";

    const OCCUPATIONS: &str = "\
soccode,Title
15-1252,Software Developers
11-1011,Chief Executives
29-1141,Registered Nurses
";

    const WAGES: &str = "\
Area,SocCode,Level1,Level2,Level3,Level4
41860,15-1252,57.69,72.12,86.54,100.96
41860,11-1011,80.00,95.00,110.00,125.00
41940,15-1252,60.00,75.00,90.00,105.00
41940,29-1141,bad,1,2,3
41940,11-1011,1.00,2.00,3.00,4.00
9999901,29-1141,30.00,35.00,40.00,45.00
";

    fn build(top_n: usize) -> RawTables {
        build_from_readers(GEOGRAPHY.as_bytes(), OCCUPATIONS.as_bytes(), WAGES.as_bytes(), top_n).unwrap()
    }

    #[test]
    fn annualizes_with_half_even_rounding() {
        assert_eq!(annualize("57.69"), Some(119_995));
        assert_eq!(annualize(" 50 "), Some(104_000));
        // 1/64 and 3/64 an hour give exactly 32.5 and 97.5 a year
        assert_eq!(annualize("0.015625"), Some(32));
        assert_eq!(annualize("0.046875"), Some(98));
        assert_eq!(annualize("N/A"), None);
        assert_eq!(annualize("NaN"), None);
        assert_eq!(annualize("-1"), None);
    }

    #[test]
    fn keeps_most_common_occupations() {
        let tables = build(2);
        let codes: Vec<&str> = tables.occupations.iter().map(|o| o.code.as_str()).collect();
        // 15-1252 and 11-1011 appear in two areas each; 29-1141 in one.
        assert_eq!(codes, ["15-1252", "11-1011"]);
        let areas: Vec<&str> = tables.wages.iter().map(|(a, _)| a).collect();
        assert_eq!(areas, ["41860", "41940"]);
        let (_, sf) = tables.wages.iter().next().unwrap();
        assert_eq!(sf["15-1252"], [119_995, 150_010, 180_003, 209_997]);
    }

    #[test]
    fn geography_dedupes_counties_and_keeps_first_name() {
        let tables = build(10);
        let (code, sf) = tables.geography.iter().next().unwrap();
        assert_eq!(code, "41860");
        assert_eq!(sf.counties, ["San Francisco County", "Marin County"]);
        assert_eq!(sf.area_name, "San Francisco-Oakland-Hayward, CA");
    }

    #[test]
    fn later_area_wins_a_shared_county_key() {
        let tables = build(10);
        let keys: Vec<&str> = tables.counties.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["San Francisco County, CA", "Marin County, CA", "Santa Clara County, CA"]);
        let (_, marin) = tables.counties.iter().nth(1).unwrap();
        assert_eq!(marin.area, "9999901");
    }

    #[test]
    fn skips_rows_with_bad_levels() {
        let tables = build(10);
        let sj = tables.wages.iter().find(|(a, _)| *a == "41940").unwrap().1;
        assert!(!sj.contains_key("29-1141"));
    }

    #[test]
    fn writes_four_tables_that_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).with_file_name(Table::Wages, "wages.json.gz");
        let tables = build(10);
        let written = write_tables(&paths, &tables).unwrap();
        assert_eq!(written.len(), 4);

        let wages_bytes = common_io::maybe_gunzip(fs::read(paths.path_for(Table::Wages)).unwrap()).unwrap();
        let wages: crate::model::raw::WagesRaw = serde_json::from_slice(&wages_bytes).unwrap();
        assert_eq!(wages, tables.wages);

        let occ = fs::read_to_string(paths.path_for(Table::Occupations)).unwrap();
        assert!(occ.contains("\n  {"));
    }

    #[test]
    fn missing_source_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            build_tables(dir.path(), 10),
            Err(WageError::NotFound(_))
        ));
    }
}
