// crates/wagemap-core/src/traits.rs
use crate::compare::ComparisonEntry;
use crate::level::{self, WageLevel};
use crate::model::{AreaInfo, CountyMatch, Occupation, WageThresholds};

/// The query interface handed to rendering collaborators (map, tooltips,
/// comparison panel).
///
/// Every method is a synchronous, read-only lookup against immutable
/// reference data. Absence is `None` or an empty result, never an error.
///
/// # Example
///
/// ```no_run
/// use wagemap_core::prelude::*;
///
/// # async fn run() -> wagemap_core::Result<()> {
/// let loader = DatasetLoader::new(DirSource::new(DataPaths::default()));
/// let db = loader.load().await?;
///
/// if let Some(area) = db.resolve_area("Santa Clara County", "CA") {
///     if let Some(t) = db.get_thresholds(area, "15-1252") {
///         let level = db.classify(165_000, &t);
///         println!("{level}, {} to go", db.gap_to_next(165_000, &t, level));
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait WageQuery {
    /// Canonical area code for a county, `None` when it cannot be resolved.
    fn resolve_area(&self, county: &str, state: &str) -> Option<&str>;

    fn get_thresholds(&self, area_code: &str, occupation_code: &str) -> Option<WageThresholds>;

    fn area_info(&self, area_code: &str) -> Option<&AreaInfo>;

    fn list_occupations(&self) -> &[Occupation];

    fn search_counties(&self, query: &str, limit: usize) -> Vec<CountyMatch>;

    fn rank(&self, locations: &[String], salary: u64, occupation: &str) -> Vec<ComparisonEntry>;

    /// See [`level::classify`].
    #[inline]
    fn classify(&self, salary: u64, thresholds: &WageThresholds) -> WageLevel {
        level::classify(salary, thresholds)
    }

    /// See [`level::gap_to_next`].
    #[inline]
    fn gap_to_next(&self, salary: u64, thresholds: &WageThresholds, level: WageLevel) -> u64 {
        level::gap_to_next(salary, thresholds, level)
    }
}
