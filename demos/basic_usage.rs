//! Basic usage of wagemap-rs
//!
//! Loads the four tables from disk, resolves a few counties and classifies a
//! salary in each of them.
//!
//! Run with `cargo run --example basic_usage`. Set `WAGEMAP_DATA_DIR` to use
//! a full dataset instead of the bundled test fixtures.

use std::path::PathBuf;
use wagemap_rs::prelude::*;

fn data_dir() -> PathBuf {
    std::env::var_os("WAGEMAP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/crates/wagemap-core/tests/data")))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== wagemap-rs Basic Usage ===\n");

    let loader = DatasetLoader::new(DirSource::new(DataPaths::new(data_dir())));
    let db = loader.load().await?;

    let stats = db.stats();
    println!(
        "Loaded {} areas, {} counties, {} occupations\n",
        stats.areas, stats.counties, stats.occupations
    );

    println!("--- Occupations ---");
    for occ in db.list_occupations().iter().take(5) {
        println!("  {}  {}", occ.code, occ.title);
    }
    println!();

    let occupation = "15-1252";
    let salary = 150_000;
    println!("--- {occupation} at ${salary} ---");
    for (county, state) in [
        ("San Francisco County", "CA"),
        ("Santa Clara County", "CA"),
        ("Saint Francis County", "AR"),
        ("Dona Ana County", "NM"),
    ] {
        let Some(area) = db.resolve_area(county, state) else {
            println!("  {county}, {state}: no wage area");
            continue;
        };
        match db.get_thresholds(area, occupation) {
            Some(t) => {
                let level = db.classify(salary, &t);
                println!(
                    "  {county}, {state} -> {area}: {level} (gap to next: ${})",
                    db.gap_to_next(salary, &t, level)
                );
            }
            None => println!("  {county}, {state} -> {area}: no data"),
        }
    }
    println!();

    println!("--- County search 'san' ---");
    for m in db.search_counties("san", 5) {
        println!("  {}, {} -> {}", m.county, m.state, m.area_code);
    }

    Ok(())
}
