// crates/wagemap-core/src/error.rs
use crate::loader::Table;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or building the wage dataset.
///
/// Query operations never produce these: a missing area, occupation or
/// county is reported as `None`. Only the one-time load (and the offline
/// builder) can fail.
#[derive(Debug, Error)]
pub enum WageError {
    /// A table file or snapshot does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "builder")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A fetched table does not match its expected shape.
    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: Table,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Wage levels must be non-decreasing (l1 <= l2 <= l3 <= l4).
    #[error("thresholds for area {area}, occupation {occupation} are not ascending: {levels:?}")]
    InvalidThresholds {
        area: String,
        occupation: String,
        levels: [u64; 4],
    },

    /// A shared in-flight load failed; every waiter receives the same cause.
    #[error("dataset load failed: {0}")]
    Load(#[source] Arc<WageError>),
}

pub type Result<T> = std::result::Result<T, WageError>;
