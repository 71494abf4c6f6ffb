// crates/wagemap-core/src/db.rs
use crate::compare::{self, ComparisonEntry};
use crate::error::Result;
use crate::level::LevelAssessment;
use crate::model::{
    AreaInfo, CountyMatch, DatasetStats, Occupation, RawTables, WageDataset, WageThresholds,
};
use crate::resolver::{AliasCollision, CountyResolver};
use crate::traits::WageQuery;
use serde::Serialize;

/// The loaded database: reference data plus the county lookup table built
/// from it.
///
/// The resolver is built once in [`WageDb::new`]; a reload produces a new
/// `WageDb`.
#[derive(Debug, Clone)]
pub struct WageDb {
    dataset: WageDataset,
    resolver: CountyResolver,
}

/// A consistency problem found by [`WageDb::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum DatasetIssue {
    /// A directory row points at an area missing from the geography table.
    #[serde(rename_all = "camelCase")]
    UnknownArea { county_key: String, area_code: String },
    /// A county listed under an area does not resolve back to that area.
    #[serde(rename_all = "camelCase")]
    UnresolvedCounty {
        area_code: String,
        county: String,
        resolved_to: Option<String>,
    },
    AliasCollision(AliasCollision),
}

impl WageDb {
    pub fn new(dataset: WageDataset) -> Self {
        let resolver = CountyResolver::build(&dataset);
        Self { dataset, resolver }
    }

    /// Validate and index the four raw tables.
    pub fn from_tables(raw: RawTables) -> Result<Self> {
        let db = Self::new(WageDataset::from_raw(raw)?);
        let stats = db.stats();
        log::info!(
            "wage dataset ready: {} areas, {} counties, {} occupations, {} wage entries",
            stats.areas,
            stats.counties,
            stats.occupations,
            stats.wage_entries
        );
        Ok(db)
    }

    pub fn dataset(&self) -> &WageDataset {
        &self.dataset
    }

    pub fn resolver(&self) -> &CountyResolver {
        &self.resolver
    }

    pub fn stats(&self) -> DatasetStats {
        self.dataset.stats()
    }

    /// Level and gap for `salary` in one area; `None` without thresholds.
    pub fn assess(&self, area_code: &str, occupation: &str, salary: u64) -> Option<LevelAssessment> {
        self.dataset
            .thresholds(area_code, occupation)
            .map(|t| LevelAssessment::new(salary, t))
    }

    /// Check directory and resolver consistency.
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        for e in self.dataset.directory() {
            if self.dataset.area_info(&e.area_code).is_none() {
                issues.push(DatasetIssue::UnknownArea {
                    county_key: e.key.clone(),
                    area_code: e.area_code.clone(),
                });
            }
        }

        for area in self.dataset.areas() {
            for county in &area.counties {
                let resolved = self.resolver.resolve(county, &area.state);
                if resolved != Some(area.area_code.as_str()) {
                    issues.push(DatasetIssue::UnresolvedCounty {
                        area_code: area.area_code.clone(),
                        county: county.clone(),
                        resolved_to: resolved.map(str::to_string),
                    });
                }
            }
        }

        issues.extend(
            self.resolver
                .collisions()
                .iter()
                .cloned()
                .map(DatasetIssue::AliasCollision),
        );
        issues
    }
}

impl WageQuery for WageDb {
    fn resolve_area(&self, county: &str, state: &str) -> Option<&str> {
        self.resolver.resolve(county, state)
    }

    fn get_thresholds(&self, area_code: &str, occupation_code: &str) -> Option<WageThresholds> {
        self.dataset.thresholds(area_code, occupation_code)
    }

    fn area_info(&self, area_code: &str) -> Option<&AreaInfo> {
        self.dataset.area_info(area_code)
    }

    fn list_occupations(&self) -> &[Occupation] {
        self.dataset.occupations()
    }

    fn search_counties(&self, query: &str, limit: usize) -> Vec<CountyMatch> {
        self.dataset.search_counties(query, limit)
    }

    fn rank(&self, locations: &[String], salary: u64, occupation: &str) -> Vec<ComparisonEntry> {
        compare::rank(&self.dataset, locations, salary, occupation)
    }
}
