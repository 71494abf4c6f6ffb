//! Error handling in wagemap-rs
//!
//! Lookups report absence with `None`; only loading can fail. This example
//! walks through both.

use std::path::PathBuf;
use wagemap_rs::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== wagemap-rs Error Handling ===\n");

    println!("--- Loading from a missing directory ---");
    let missing = DatasetLoader::new(DirSource::new(DataPaths::new("/definitely/not/here")));
    match missing.load().await {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  load failed: {e}"),
    }
    println!("  loaded afterwards: {}\n", missing.is_loaded());

    println!("--- Loading malformed tables ---");
    let broken = MemorySource::new()
        .with_table(Table::Wages, "{}")
        .with_table(Table::Geography, "not json")
        .with_table(Table::Counties, "{}")
        .with_table(Table::Occupations, "[]");
    if let Err(e) = DatasetLoader::new(broken).load().await {
        println!("  load failed: {e}\n");
    }

    let dir = std::env::var_os("WAGEMAP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/crates/wagemap-core/tests/data")));
    let db = DatasetLoader::new(DirSource::new(DataPaths::new(dir))).load().await?;

    println!("--- Lookups that find nothing ---");
    for (county, state) in [("", "CA"), ("Atlantis County", "ZZ"), ("San Francisco County", "NY")] {
        println!("  resolve({county:?}, {state:?}) = {:?}", db.resolve_area(county, state));
    }
    println!("  thresholds(41860, 99-9999) = {:?}", db.get_thresholds("41860", "99-9999"));
    println!("  thresholds(48864, 15-1252) = {:?}", db.get_thresholds("48864", "15-1252"));
    println!("  search(\"s\") = {} hits (queries need two characters)", db.search_counties("s", 10).len());

    Ok(())
}
