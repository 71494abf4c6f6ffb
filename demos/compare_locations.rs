//! Comparing several locations for one salary
//!
//! Builds a comparison set of up to five areas and prints them best level
//! first. Shows the duplicate and capacity errors as well.

use std::path::PathBuf;
use wagemap_rs::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::var_os("WAGEMAP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/crates/wagemap-core/tests/data")));
    let db = DatasetLoader::new(DirSource::new(DataPaths::new(dir))).load().await?;

    let mut set = ComparisonSet::new();
    for area in ["41860", "41940", "22220", "29740", "48864"] {
        set.add(area)?;
    }

    if let Err(e) = set.add("41860") {
        println!("add 41860 again: {e}");
    }
    if let Err(e) = set.add("12580") {
        println!("add a sixth location: {e}");
    }
    println!();

    let salary = 110_000;
    println!("15-1252 at ${salary}:");
    for (i, e) in set.rank(db.dataset(), salary, "15-1252").iter().enumerate() {
        let level = e.level.map_or_else(|| "no data".to_string(), |l| l.to_string());
        let gap = e
            .gap_to_next_level
            .map_or_else(String::new, |g| format!(", ${g} to next"));
        println!("  {}. {} ({}): {level}{gap}", i + 1, e.area_name, e.area_code);
    }

    Ok(())
}
