// crates/wagemap-core/src/loader/fs.rs
#![cfg(feature = "fs")]

use super::common_io::open_error;
use super::{DataPaths, Table, TableSource};
use crate::error::Result;
use futures::future::{BoxFuture, FutureExt};

/// Reads the tables from a directory with `tokio::fs`.
///
/// Requires a running tokio runtime when the returned futures are polled.
#[derive(Debug, Clone, Default)]
pub struct DirSource {
    paths: DataPaths,
}

impl DirSource {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}

impl TableSource for DirSource {
    fn fetch(&self, table: Table) -> BoxFuture<'static, Result<Vec<u8>>> {
        let path = self.paths.path_for(table);
        async move {
            log::debug!("reading {table} table from {}", path.display());
            tokio::fs::read(&path)
                .await
                .map_err(|e| open_error(&format!("{table} table"), &path, e))
        }
        .boxed()
    }
}
