use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for wagemap-cli
#[derive(Debug, Parser)]
#[command(
    name = "wagemap",
    version,
    about = "Look up prevailing wage levels by county, area and occupation"
)]
pub struct CliArgs {
    /// Directory holding wages.json, geography.json, counties.json and occupations.json.
    /// Required unless --snapshot is given.
    #[arg(short = 'd', long = "data-dir", env = "WAGEMAP_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Load all tables from a binary snapshot instead of the JSON files
    #[arg(short = 's', long = "snapshot", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// List occupations
    Occupations {
        /// Only show occupations whose code or title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Resolve a county to its wage area
    Resolve {
        /// County name (e.g. "St. Francis County")
        county: String,
        /// State abbreviation (e.g. AR)
        state: String,
    },

    /// Classify a salary in one area
    Level {
        #[command(flatten)]
        query: SalaryArgs,

        /// Wage area code (e.g. 41860)
        #[arg(short, long, conflicts_with_all = ["county", "state"], required_unless_present = "county")]
        area: Option<String>,

        /// County name, resolved together with --state
        #[arg(short, long, requires = "state")]
        county: Option<String>,

        /// State abbreviation for --county
        #[arg(long)]
        state: Option<String>,
    },

    /// Rank several locations for one salary
    Compare {
        #[command(flatten)]
        query: SalaryArgs,

        /// Area code or "County, ST"; repeat for each location
        #[arg(short, long = "location", required = true)]
        locations: Vec<String>,
    },

    /// Search counties by name
    Search {
        /// Case-insensitive text to look for in "County, ST"
        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Check the dataset for directory and alias conflicts
    Validate,

    /// Regenerate the tables from the OFLC CSV export (needs the `builder` feature)
    Build {
        /// Directory with Geography.csv, oes_soc_occs.csv and ALC_Export.csv
        #[arg(long)]
        source: PathBuf,

        /// Output directory for the JSON tables
        #[arg(long)]
        out: PathBuf,

        /// Number of most common occupations to keep
        #[arg(long, default_value_t = 100)]
        top: usize,

        /// Also write a binary snapshot to this file
        #[arg(long = "write-snapshot")]
        write_snapshot: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct SalaryArgs {
    /// SOC occupation code (e.g. 15-1252)
    #[arg(short, long)]
    pub occupation: String,

    /// Annual salary in dollars (commas and a leading $ are accepted)
    #[arg(long, value_parser = parse_salary)]
    pub salary: u64,
}

pub fn parse_salary(s: &str) -> Result<u64, String> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    cleaned
        .parse::<u64>()
        .map_err(|_| format!("not a whole-dollar salary: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_accepts_common_spellings() {
        assert_eq!(parse_salary("150000"), Ok(150_000));
        assert_eq!(parse_salary("$150,000"), Ok(150_000));
        assert_eq!(parse_salary(" 95_000 "), Ok(95_000));
        assert!(parse_salary("95k").is_err());
        assert!(parse_salary("-1").is_err());
    }

    #[test]
    fn level_needs_area_or_county() {
        let args = CliArgs::try_parse_from([
            "wagemap", "level", "-o", "15-1252", "--salary", "150000", "--area", "41860",
        ])
        .unwrap();
        assert!(matches!(args.command, Commands::Level { area: Some(_), .. }));

        assert!(CliArgs::try_parse_from(["wagemap", "level", "-o", "15-1252", "--salary", "1"]).is_err());
        assert!(CliArgs::try_parse_from([
            "wagemap", "level", "-o", "x", "--salary", "1", "--county", "Marin"
        ])
        .is_err());
    }

    #[test]
    fn verbosity_counts() {
        let args = CliArgs::try_parse_from(["wagemap", "-vv", "stats"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
