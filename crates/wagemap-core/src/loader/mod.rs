// crates/wagemap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Fetches the four reference tables through a [`TableSource`], parses them
//! and builds the [`WageDb`]. The load runs at most once at a time: callers
//! that arrive while it is in flight await the same shared future.

use crate::db::WageDb;
use crate::error::{Result, WageError};
use crate::model::RawTables;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

mod common_io;
#[cfg(feature = "fs")]
mod fs;
pub mod snapshot;

#[cfg(feature = "builder")]
pub mod builder;

#[cfg(feature = "fs")]
pub use fs::DirSource;
pub use snapshot::{read_snapshot, snapshot_from_bytes, write_snapshot, CompressionMode};

/// The four logical tables making up a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Wages,
    Geography,
    Counties,
    Occupations,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Wages,
        Table::Geography,
        Table::Counties,
        Table::Occupations,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Wages => "wages",
            Table::Geography => "geography",
            Table::Counties => "counties",
            Table::Occupations => "occupations",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            Table::Wages => "wages.json",
            Table::Geography => "geography.json",
            Table::Counties => "counties.json",
            Table::Occupations => "occupations.json",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the tables live on disk.
///
/// File names ending in `.gz` are gunzipped on read (and gzipped by the
/// builder) when the `compact` feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub dir: PathBuf,
    files: [String; 4],
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Table::ALL.map(|t| t.default_file_name().to_string()),
        }
    }

    /// `<crate>/data`, resolved at compile time.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn with_file_name(mut self, table: Table, name: impl Into<String>) -> Self {
        self.files[table as usize] = name.into();
        self
    }

    pub fn file_name(&self, table: Table) -> &str {
        &self.files[table as usize]
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.dir.join(self.file_name(table))
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}

/// Transport for the raw table bytes (JSON, optionally gzip-compressed).
pub trait TableSource: Send + Sync + 'static {
    fn fetch(&self, table: Table) -> BoxFuture<'static, Result<Vec<u8>>>;
}

/// Tables held in memory. Used by tests and by hosts that fetch the bytes
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<Table, Arc<[u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Table, bytes: impl Into<Vec<u8>>) -> Self {
        self.tables.insert(table, Arc::from(bytes.into()));
        self
    }
}

impl TableSource for MemorySource {
    fn fetch(&self, table: Table) -> BoxFuture<'static, Result<Vec<u8>>> {
        let bytes = self
            .tables
            .get(&table)
            .map(|b| b.to_vec())
            .ok_or_else(|| WageError::NotFound(format!("{table} table not provided")));
        futures::future::ready(bytes).boxed()
    }
}

/// Fetch all four tables concurrently and parse them. Fails if any one
/// fetch or parse fails.
pub async fn fetch_tables<S: TableSource + ?Sized>(source: &S) -> Result<RawTables> {
    let (wages, geography, counties, occupations) = futures::try_join!(
        source.fetch(Table::Wages),
        source.fetch(Table::Geography),
        source.fetch(Table::Counties),
        source.fetch(Table::Occupations),
    )?;
    Ok(RawTables {
        wages: parse_table(Table::Wages, wages)?,
        geography: parse_table(Table::Geography, geography)?,
        counties: parse_table(Table::Counties, counties)?,
        occupations: parse_table(Table::Occupations, occupations)?,
    })
}

fn parse_table<T: DeserializeOwned>(table: Table, bytes: Vec<u8>) -> Result<T> {
    let bytes = common_io::maybe_gunzip(bytes)?;
    serde_json::from_slice(&bytes).map_err(|source| WageError::Parse { table, source })
}

type SharedLoad = Shared<BoxFuture<'static, std::result::Result<Arc<WageDb>, Arc<WageError>>>>;

/// Loads the dataset once and hands the same [`WageDb`] to every caller.
///
/// - Concurrent `load()` calls share one in-flight load (one fetch per table).
/// - A successful result is kept; later calls return it immediately.
/// - A failure reaches every caller awaiting that load. The next `load()`
///   starts a fresh attempt.
pub struct DatasetLoader<S> {
    source: Arc<S>,
    inflight: Mutex<Option<SharedLoad>>,
}

impl<S: TableSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            inflight: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Await the dataset, starting the load if nothing is in flight.
    pub async fn load(&self) -> Result<Arc<WageDb>> {
        self.current_or_start(false).await.map_err(WageError::Load)
    }

    /// Discard the loaded dataset and load again. Callers already awaiting
    /// the previous load still receive its result.
    pub async fn reload(&self) -> Result<Arc<WageDb>> {
        self.current_or_start(true).await.map_err(WageError::Load)
    }

    /// The dataset if a load has completed successfully.
    pub fn get(&self) -> Option<Arc<WageDb>> {
        let guard = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref()?.peek() {
            Some(Ok(db)) => Some(Arc::clone(db)),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.get().is_some()
    }

    fn current_or_start(&self, restart: bool) -> SharedLoad {
        let mut guard = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = guard.as_ref() {
            let failed = matches!(current.peek(), Some(Err(_)));
            if !restart && !failed {
                return current.clone();
            }
        }

        log::debug!("starting dataset load");
        let source = Arc::clone(&self.source);
        let load = async move {
            let raw = fetch_tables(source.as_ref()).await?;
            WageDb::from_tables(raw)
        }
        .map(|res| match res {
            Ok(db) => Ok(Arc::new(db)),
            Err(e) => {
                log::warn!("dataset load failed: {e}");
                Err(Arc::new(e))
            }
        })
        .boxed()
        .shared();

        *guard = Some(load.clone());
        load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_default_and_override() {
        let p = DataPaths::new("/tmp/data").with_file_name(Table::Wages, "wages.json.gz");
        assert_eq!(p.path_for(Table::Wages), PathBuf::from("/tmp/data/wages.json.gz"));
        assert_eq!(p.file_name(Table::Counties), "counties.json");
        assert!(DataPaths::default().dir.ends_with("data"));
    }

    #[test]
    fn memory_source_reports_missing_table() {
        let src = MemorySource::new().with_table(Table::Wages, b"{}".to_vec());
        let res = futures::executor::block_on(src.fetch(Table::Counties));
        assert!(matches!(res, Err(WageError::NotFound(_))));
    }

    #[test]
    fn parse_errors_name_the_table() {
        let err = parse_table::<RawTables>(Table::Geography, b"not json".to_vec()).unwrap_err();
        assert!(err.to_string().contains("geography"));
    }
}
