//! wagemap-cli
//! ===========
//!
//! Command-line interface for the `wagemap-core` prevailing wage database.
//!
//! This crate primarily provides a binary (`wagemap`). The library target
//! exists so docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install wagemap-cli
//! wagemap --help
//! wagemap stats
//! wagemap resolve "Doña Ana County" NM
//! wagemap level -o 15-1252 --salary 150000 --area 41860
//! wagemap compare -o 15-1252 --salary 150000 -l 41860 -l 41940
//! ```
//!
//! Rebuilding the tables from the OFLC export:
//!
//! ```text
//! wagemap build --source ./oflc_csv --out ./data --top 100
//! ```
//!
//! For programmatic access use the [`wagemap-core`] crate directly.
//!
//! [`wagemap-core`]: https://docs.rs/wagemap-core
