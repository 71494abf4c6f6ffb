// crates/wagemap-core/src/lib.rs

//! # wagemap-core
//!
//! Maps an annual salary and an occupation (SOC code) to a prevailing wage
//! level (0-4) for any U.S. county, using the OFLC wage thresholds published
//! per metropolitan/statistical area.
//!
//! - [`model`]: the immutable reference tables ([`WageDataset`])
//! - [`resolver`]: county name + state -> wage-area code ([`CountyResolver`])
//! - [`level`]: salary + thresholds -> level and gap to the next level
//! - [`compare`]: ranking of several locations for one salary
//! - [`loader`]: one-shot asynchronous load of the four tables
//!
//! [`WageDb`] ties these together behind the [`WageQuery`] trait.

pub mod compare;
pub mod db;
pub mod error;
pub mod level;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod resolver;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::compare::{ComparisonEntry, ComparisonError, ComparisonSet, MAX_COMPARISON_LOCATIONS};
pub use crate::db::{DatasetIssue, WageDb};
pub use crate::error::{Result, WageError};
pub use crate::level::{classify, gap_to_next, LevelAssessment, WageLevel};
pub use crate::loader::{DataPaths, DatasetLoader, MemorySource, Table, TableSource};
pub use crate::model::{
    AreaInfo, CountyDirectoryEntry, CountyMatch, DatasetStats, Occupation, RawTables, WageDataset,
    WageThresholds,
};
pub use crate::resolver::CountyResolver;
pub use crate::traits::WageQuery;

#[cfg(feature = "fs")]
pub use crate::loader::DirSource;
