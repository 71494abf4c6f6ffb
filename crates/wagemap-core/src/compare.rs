// crates/wagemap-core/src/compare.rs

//! Multi-location comparison: rank areas by how well one salary classifies
//! in each of them.

use crate::level::{classify, gap_to_next, WageLevel};
use crate::model::{WageDataset, WageThresholds};
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Default number of locations a comparison may hold at once.
pub const MAX_COMPARISON_LOCATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("comparison is full ({capacity} locations)")]
    CapacityExceeded { capacity: usize },

    #[error("area {0} is already in the comparison")]
    Duplicate(String),
}

/// One ranked location. Computed per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub area_code: String,
    pub area_name: String,
    pub state: String,
    /// `None` when the area has no data for the occupation.
    pub level: Option<WageLevel>,
    pub gap_to_next_level: Option<u64>,
    pub thresholds: Option<WageThresholds>,
}

impl ComparisonEntry {
    fn compute(dataset: &WageDataset, area_code: &str, salary: u64, occupation: &str) -> Self {
        let (area_name, state) = dataset
            .area_info(area_code)
            .map(|a| (a.area_name.clone(), a.state.clone()))
            .unwrap_or_else(|| (area_code.to_string(), String::new()));
        let thresholds = dataset.thresholds(area_code, occupation);
        let level = thresholds.map(|t| classify(salary, &t));
        let gap_to_next_level = thresholds.zip(level).map(|(t, l)| gap_to_next(salary, &t, l));
        Self {
            area_code: area_code.to_string(),
            area_name,
            state,
            level,
            gap_to_next_level,
            thresholds,
        }
    }

    /// Primary key: unknown ranks below level 0.
    fn level_rank(&self) -> i8 {
        self.level.map_or(-1, |l| l.as_u8() as i8)
    }

    /// Secondary key: a missing gap sorts after every real gap.
    fn gap_rank(&self) -> u64 {
        self.gap_to_next_level.unwrap_or(u64::MAX)
    }
}

fn by_rank(a: &ComparisonEntry, b: &ComparisonEntry) -> Ordering {
    b.level_rank()
        .cmp(&a.level_rank())
        .then_with(|| a.gap_rank().cmp(&b.gap_rank()))
}

/// Rank `locations` (area codes) for `salary` in `occupation`.
///
/// Level descending, then gap-to-next ascending; ties keep input order.
/// Pure: recompute whenever salary, occupation or the location set changes.
pub fn rank<S: AsRef<str>>(
    dataset: &WageDataset,
    locations: &[S],
    salary: u64,
    occupation: &str,
) -> Vec<ComparisonEntry> {
    let mut entries: Vec<ComparisonEntry> = locations
        .iter()
        .map(|area| ComparisonEntry::compute(dataset, area.as_ref(), salary, occupation))
        .collect();
    entries.sort_by(by_rank);
    entries
}

/// A bounded, duplicate-free set of area codes to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSet {
    locations: Vec<String>,
    capacity: usize,
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMPARISON_LOCATIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locations: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an area code. Duplicates and adds beyond capacity are rejected
    /// and leave the set unchanged.
    pub fn add(&mut self, area_code: impl Into<String>) -> Result<(), ComparisonError> {
        let area_code = area_code.into();
        if self.locations.contains(&area_code) {
            return Err(ComparisonError::Duplicate(area_code));
        }
        if self.is_full() {
            return Err(ComparisonError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.locations.push(area_code);
        Ok(())
    }

    /// Returns `true` if the area was present.
    pub fn remove(&mut self, area_code: &str) -> bool {
        let before = self.locations.len();
        self.locations.retain(|a| a != area_code);
        self.locations.len() != before
    }

    pub fn clear(&mut self) {
        self.locations.clear();
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.locations.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rank the current locations; see [`rank`].
    pub fn rank(&self, dataset: &WageDataset, salary: u64, occupation: &str) -> Vec<ComparisonEntry> {
        rank(dataset, &self.locations, salary, occupation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeographyRaw, RawTables};
    use std::collections::BTreeMap;

    const OCC: &str = "15-1252";

    fn dataset(areas: &[(&str, [u64; 4])]) -> WageDataset {
        let mut raw = RawTables::default();
        for &(code, levels) in areas {
            raw.wages.push(code, BTreeMap::from([(OCC.to_string(), levels)]));
            raw.geography.push(
                code,
                GeographyRaw {
                    area_name: format!("Area {code}"),
                    state: "CA".into(),
                    counties: Vec::new(),
                },
            );
        }
        WageDataset::from_raw(raw).unwrap()
    }

    fn codes(entries: &[ComparisonEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.area_code.as_str()).collect()
    }

    #[test]
    fn smaller_gap_wins_within_a_level() {
        // Salary 100k: A is level 3 needing 2k, B is level 3 needing 5k.
        let ds = dataset(&[
            ("B", [60_000, 80_000, 95_000, 105_000]),
            ("A", [60_000, 80_000, 95_000, 102_000]),
        ]);
        let ranked = rank(&ds, &["B", "A"], 100_000, OCC);
        assert_eq!(codes(&ranked), ["A", "B"]);
        assert_eq!(ranked[0].gap_to_next_level, Some(2_000));
        assert_eq!(ranked[1].gap_to_next_level, Some(5_000));
    }

    #[test]
    fn higher_level_always_wins() {
        let ds = dataset(&[
            ("L2", [50_000, 99_000, 500_000, 600_000]),
            ("L4", [10_000, 20_000, 30_000, 40_000]),
        ]);
        let ranked = rank(&ds, &["L2", "L4"], 100_000, OCC);
        assert_eq!(codes(&ranked), ["L4", "L2"]);
        assert_eq!(ranked[0].level, Some(WageLevel::Level4));
        assert_eq!(ranked[1].level, Some(WageLevel::Level2));
    }

    #[test]
    fn no_data_ranks_last() {
        let ds = dataset(&[("LOW", [200_000, 300_000, 400_000, 500_000])]);
        let ranked = rank(&ds, &["99999", "LOW"], 100_000, OCC);
        assert_eq!(codes(&ranked), ["LOW", "99999"]);
        let missing = &ranked[1];
        assert_eq!(missing.level, None);
        assert_eq!(missing.gap_to_next_level, None);
        assert_eq!(missing.area_name, "99999");
    }

    #[test]
    fn ties_keep_input_order() {
        let ds = dataset(&[("X", [1, 2, 3, 4]), ("Y", [1, 2, 3, 4])]);
        assert_eq!(codes(&rank(&ds, &["Y", "X"], 10, OCC)), ["Y", "X"]);
    }

    #[test]
    fn capacity_and_duplicates_are_rejected() {
        let mut set = ComparisonSet::new();
        for code in ["1", "2", "3", "4", "5"] {
            set.add(code).unwrap();
        }
        assert_eq!(
            set.add("6"),
            Err(ComparisonError::CapacityExceeded { capacity: 5 })
        );
        assert_eq!(set.len(), 5);
        assert_eq!(set.add("3"), Err(ComparisonError::Duplicate("3".into())));
        assert_eq!(set.len(), 5);
        assert!(set.remove("3"));
        assert!(!set.remove("3"));
        set.add("6").unwrap();
        assert_eq!(set.locations(), ["1", "2", "4", "5", "6"]);
    }

    #[test]
    fn set_ranking_recomputes_on_salary_change() {
        let ds = dataset(&[
            ("A", [100_000, 110_000, 120_000, 130_000]),
            ("B", [50_000, 200_000, 300_000, 400_000]),
        ]);
        let mut set = ComparisonSet::with_capacity(2);
        set.add("A").unwrap();
        set.add("B").unwrap();
        assert_eq!(codes(&set.rank(&ds, 60_000, OCC)), ["B", "A"]);
        assert_eq!(codes(&set.rank(&ds, 125_000, OCC)), ["A", "B"]);
    }
}
