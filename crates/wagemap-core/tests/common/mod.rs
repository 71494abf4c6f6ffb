#![allow(dead_code)]

use wagemap_core::{MemorySource, Table};

pub const WAGES: &[u8] = include_bytes!("../data/wages.json");
pub const GEOGRAPHY: &[u8] = include_bytes!("../data/geography.json");
pub const COUNTIES: &[u8] = include_bytes!("../data/counties.json");
pub const OCCUPATIONS: &[u8] = include_bytes!("../data/occupations.json");

pub fn fixture_bytes(table: Table) -> &'static [u8] {
    match table {
        Table::Wages => WAGES,
        Table::Geography => GEOGRAPHY,
        Table::Counties => COUNTIES,
        Table::Occupations => OCCUPATIONS,
    }
}

pub fn fixture_source() -> MemorySource {
    Table::ALL
        .into_iter()
        .fold(MemorySource::new(), |src, t| src.with_table(t, fixture_bytes(t).to_vec()))
}

pub fn fixture_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}
