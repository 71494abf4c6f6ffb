//! wagemap prelude: bring the common types and the query trait into scope.

#![allow(unused_imports)]

pub use crate::compare::{ComparisonEntry, ComparisonError, ComparisonSet, MAX_COMPARISON_LOCATIONS};
pub use crate::db::{DatasetIssue, WageDb};
pub use crate::error::{Result, WageError};
pub use crate::level::{LevelAssessment, WageLevel};
pub use crate::loader::{DataPaths, DatasetLoader, MemorySource, Table, TableSource};
pub use crate::model::{AreaInfo, CountyMatch, Occupation, WageDataset, WageThresholds};
pub use crate::traits::WageQuery;

#[cfg(feature = "fs")]
pub use crate::loader::DirSource;
