//! wagemap - command-line interface for wagemap-core
//!
//! Looks up OFLC prevailing wage levels from the terminal: resolve a county
//! to its wage area, classify a salary, compare several locations and
//! regenerate the JSON tables from the OFLC CSV export.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset statistics
//!   $ wagemap stats
//!
//! - Which wage area is St. Francis County, AR in?
//!   $ wagemap resolve "St. Francis County" AR
//!
//! - Level for a software developer earning $150,000 in San Francisco
//!   $ wagemap level -o 15-1252 --salary 150000 --area 41860
//!   $ wagemap level -o 15-1252 --salary 150000 --county "San Francisco County" --state CA
//!
//! - Compare up to five locations
//!   $ wagemap compare -o 15-1252 --salary 150000 -l 41860 -l "Travis County, TX"
//!
//! Data source
//! -----------
//!
//! Tables are read from `--data-dir` (or `WAGEMAP_DATA_DIR`).
//! `--snapshot <file>` loads a binary snapshot written by
//! `wagemap build --write-snapshot` instead. Every command except `build`
//! needs one of the two.
mod args;

use crate::args::{CliArgs, Commands, SalaryArgs};
use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use wagemap_core::loader::read_snapshot;
use wagemap_core::prelude::*;
use wagemap_core::DatasetIssue;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if let Commands::Build {
        source,
        out,
        top,
        write_snapshot,
    } = &args.command
    {
        return build(source, out, *top, write_snapshot.as_ref());
    }

    let db = load_db(data_source(args.data_dir, args.snapshot)?).await?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Wage areas: {}", stats.areas);
            println!("  Counties: {}", stats.counties);
            println!("  Occupations: {}", stats.occupations);
            println!("  Wage entries: {}", stats.wage_entries);
            println!("  Resolver keys: {}", db.resolver().len());
        }

        Commands::Occupations { filter } => {
            let needle = filter.map(|f| f.to_lowercase());
            for occ in db.list_occupations() {
                let hit = needle.as_deref().map_or(true, |n| {
                    occ.code.to_lowercase().contains(n) || occ.title.to_lowercase().contains(n)
                });
                if hit {
                    println!("{}  {}", occ.code, occ.title);
                }
            }
        }

        Commands::Resolve { county, state } => match db.resolve_area(&county, &state) {
            Some(code) => match db.area_info(code) {
                Some(area) => println!("{code}  {} ({})", area.area_name, area.state),
                None => println!("{code}"),
            },
            None => println!("No wage area found for '{county}, {state}'."),
        },

        Commands::Level {
            query,
            area,
            county,
            state,
        } => {
            let area_code = match (area, county, state) {
                (Some(a), _, _) => a,
                (None, Some(c), Some(s)) => match db.resolve_area(&c, &s) {
                    Some(code) => code.to_string(),
                    None => {
                        println!("No wage area found for '{c}, {s}'.");
                        return Ok(());
                    }
                },
                _ => bail!("either --area or --county with --state is required"),
            };
            print_level(&db, &area_code, &query);
        }

        Commands::Compare { query, locations } => {
            let mut set = ComparisonSet::new();
            for loc in &locations {
                let Some(code) = location_to_area(&db, loc) else {
                    println!("Skipping '{loc}': no wage area found.");
                    continue;
                };
                if let Err(e) = set.add(code) {
                    println!("Skipping '{loc}': {e}.");
                }
            }
            if set.is_empty() {
                println!("Nothing to compare.");
                return Ok(());
            }
            print_comparison(&set.rank(db.dataset(), query.salary, &query.occupation), &query);
        }

        Commands::Search { query, limit } => {
            let hits = db.search_counties(&query, limit);
            if hits.is_empty() {
                println!("No counties matching '{query}'.");
            }
            for m in &hits {
                println!("{}", describe_match(m));
            }
        }

        Commands::Validate => {
            let issues = db.validate();
            if issues.is_empty() {
                println!("No issues found.");
            }
            for issue in &issues {
                println!("{}", describe_issue(issue));
            }
            if !issues.is_empty() {
                println!("{} issue(s)", issues.len());
            }
        }

        Commands::Build { .. } => unreachable!("handled before loading"),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Where the tables come from.
#[derive(Debug, PartialEq, Eq)]
enum DataSource {
    Snapshot(PathBuf),
    Dir(PathBuf),
}

/// A snapshot wins over a data directory. There is no built-in default.
fn data_source(data_dir: Option<PathBuf>, snapshot: Option<PathBuf>) -> anyhow::Result<DataSource> {
    match (snapshot, data_dir) {
        (Some(path), _) => Ok(DataSource::Snapshot(path)),
        (None, Some(dir)) => Ok(DataSource::Dir(dir)),
        (None, None) => bail!("no data source: pass --data-dir (or set WAGEMAP_DATA_DIR) or --snapshot"),
    }
}

async fn load_db(source: DataSource) -> anyhow::Result<std::sync::Arc<WageDb>> {
    match source {
        DataSource::Snapshot(path) => {
            let tables = read_snapshot(&path).with_context(|| format!("reading snapshot {}", path.display()))?;
            Ok(std::sync::Arc::new(WageDb::from_tables(tables)?))
        }
        DataSource::Dir(dir) => {
            log::info!("loading tables from {}", dir.display());
            let loader = DatasetLoader::new(DirSource::new(DataPaths::new(&dir)));
            let db = loader
                .load()
                .await
                .with_context(|| format!("loading tables from {}", dir.display()))?;
            Ok(db)
        }
    }
}

/// Area codes pass through; "County, ST" goes through the resolver.
fn location_to_area(db: &WageDb, location: &str) -> Option<String> {
    match location.rsplit_once(',') {
        Some((county, state)) => db.resolve_area(county, state).map(str::to_string),
        None => Some(location.trim().to_string()),
    }
}

fn print_level(db: &WageDb, area_code: &str, query: &SalaryArgs) {
    let area = db
        .area_info(area_code)
        .map_or_else(|| area_code.to_string(), |a| format!("{} ({})", a.area_name, a.state));
    let Some(assessment) = db.assess(area_code, &query.occupation, query.salary) else {
        println!("No wage data for {} in {area}.", query.occupation);
        return;
    };

    println!("{area}, {}", occupation_title(db, &query.occupation));
    println!("  Salary: {}", usd(query.salary));
    println!("  {}", assessment.level.label());
    for (i, amount) in assessment.thresholds.as_array().iter().enumerate() {
        println!("    Level {}: {}", i + 1, usd(*amount));
    }
    match assessment.level.next() {
        Some(next) => println!("  {} more to reach {}", usd(assessment.gap_to_next), next.label()),
        None => println!("  Highest level reached"),
    }
}

fn print_comparison(entries: &[ComparisonEntry], query: &SalaryArgs) {
    println!("{} at {}:", query.occupation, usd(query.salary));
    for (rank, e) in entries.iter().enumerate() {
        let place = if e.state.is_empty() {
            e.area_name.clone()
        } else {
            format!("{} ({})", e.area_name, e.state)
        };
        match (e.level, e.gap_to_next_level) {
            (Some(level), Some(gap)) if level.next().is_some() => {
                println!("  {}. {place}: {level}, {} to next", rank + 1, usd(gap))
            }
            (Some(level), _) => println!("  {}. {place}: {level}", rank + 1),
            (None, _) => println!("  {}. {place}: no data", rank + 1),
        }
    }
}

fn describe_match(m: &CountyMatch) -> String {
    format!("{}, {}  ->  {} {}", m.county, m.state, m.area_code, m.area_name)
}

fn occupation_title(db: &WageDb, code: &str) -> String {
    db.dataset()
        .occupation(code)
        .map_or_else(|| code.to_string(), |o| format!("{} ({code})", o.title))
}

fn describe_issue(issue: &DatasetIssue) -> String {
    match issue {
        DatasetIssue::UnknownArea { county_key, area_code } => {
            format!("directory row '{county_key}' points at unknown area {area_code}")
        }
        DatasetIssue::UnresolvedCounty {
            area_code,
            county,
            resolved_to,
        } => match resolved_to {
            Some(other) => format!("'{county}' in area {area_code} resolves to {other}"),
            None => format!("'{county}' in area {area_code} does not resolve"),
        },
        DatasetIssue::AliasCollision(c) => format!(
            "{:?} key '{}' kept for area {}, rejected for {}",
            c.kind, c.key, c.kept, c.rejected
        ),
    }
}

#[cfg(feature = "builder")]
fn build(source: &std::path::Path, out: &std::path::Path, top: usize, snapshot: Option<&PathBuf>) -> anyhow::Result<()> {
    use wagemap_core::loader::{builder, write_snapshot, CompressionMode};

    let tables = builder::build_tables(source, top)
        .with_context(|| format!("building tables from {}", source.display()))?;
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    for path in builder::write_tables(&DataPaths::new(out), &tables)? {
        println!("wrote {}", path.display());
    }
    if let Some(path) = snapshot {
        write_snapshot(path, &tables, CompressionMode::default())?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(not(feature = "builder"))]
fn build(_: &std::path::Path, _: &std::path::Path, _: usize, _: Option<&PathBuf>) -> anyhow::Result<()> {
    bail!("this binary was built without the `builder` feature")
}

/// Whole dollars with thousands separators.
fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{data_source, describe_match, usd, DataSource};
    use std::path::PathBuf;
    use wagemap_core::CountyMatch;

    #[test]
    fn data_source_needs_a_directory_or_snapshot() {
        assert!(data_source(None, None).is_err());
        assert_eq!(
            data_source(Some(PathBuf::from("data")), None).unwrap(),
            DataSource::Dir(PathBuf::from("data"))
        );
        assert_eq!(
            data_source(Some(PathBuf::from("data")), Some(PathBuf::from("db.bin"))).unwrap(),
            DataSource::Snapshot(PathBuf::from("db.bin"))
        );
    }

    #[test]
    fn search_hits_show_county_and_area() {
        let m = CountyMatch {
            county: "Doña Ana County".into(),
            state: "NM".into(),
            area_code: "29740".into(),
            area_name: "Las Cruces, NM".into(),
        };
        assert_eq!(describe_match(&m), "Doña Ana County, NM  ->  29740 Las Cruces, NM");
    }

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(0), "$0");
        assert_eq!(usd(999), "$999");
        assert_eq!(usd(1_000), "$1,000");
        assert_eq!(usd(150_000), "$150,000");
        assert_eq!(usd(1_234_567), "$1,234,567");
    }
}
