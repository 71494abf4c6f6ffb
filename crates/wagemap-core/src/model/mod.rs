// crates/wagemap-core/src/model/mod.rs
pub mod dataset;
pub mod raw;

pub use dataset::WageDataset;
pub use raw::{CountyRaw, GeographyRaw, OccupationRaw, OrderedTable, RawTables};

use crate::error::{Result, WageError};
use serde::{Deserialize, Serialize};

/// The four annual wage thresholds for one (area, occupation) pair.
///
/// Always non-decreasing: construct through [`WageThresholds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WageThresholds {
    pub l1: u64,
    pub l2: u64,
    pub l3: u64,
    pub l4: u64,
}

impl WageThresholds {
    /// Returns `None` unless `l1 <= l2 <= l3 <= l4`.
    pub fn new(l1: u64, l2: u64, l3: u64, l4: u64) -> Option<Self> {
        (l1 <= l2 && l2 <= l3 && l3 <= l4).then_some(Self { l1, l2, l3, l4 })
    }

    pub(crate) fn from_levels(area: &str, occupation: &str, levels: [u64; 4]) -> Result<Self> {
        let [l1, l2, l3, l4] = levels;
        Self::new(l1, l2, l3, l4).ok_or_else(|| WageError::InvalidThresholds {
            area: area.to_string(),
            occupation: occupation.to_string(),
            levels,
        })
    }

    /// Threshold for level `1..=4`; `None` for any other level.
    pub fn level(&self, level: u8) -> Option<u64> {
        match level {
            1 => Some(self.l1),
            2 => Some(self.l2),
            3 => Some(self.l3),
            4 => Some(self.l4),
            _ => None,
        }
    }

    pub fn as_array(&self) -> [u64; 4] {
        [self.l1, self.l2, self.l3, self.l4]
    }
}

/// A wage area: a metro/statistical area or a balance-of-state region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaInfo {
    pub area_code: String,
    /// Display only.
    pub area_name: String,
    pub state: String,
    pub counties: Vec<String>,
}

/// One row of the county directory, keyed by its raw `"County, State"` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyDirectoryEntry {
    pub key: String,
    pub county: String,
    pub state: String,
    pub area_code: String,
    pub area_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub code: String,
    pub title: String,
}

/// A county search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyMatch {
    pub county: String,
    pub state: String,
    pub area_code: String,
    pub area_name: String,
}

impl From<&CountyDirectoryEntry> for CountyMatch {
    fn from(e: &CountyDirectoryEntry) -> Self {
        Self {
            county: e.county.clone(),
            state: e.state.clone(),
            area_code: e.area_code.clone(),
            area_name: e.area_name.clone(),
        }
    }
}

/// Simple aggregate counts for a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub areas: usize,
    pub counties: usize,
    pub occupations: usize,
    pub wage_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_must_ascend() {
        assert!(WageThresholds::new(1, 2, 3, 4).is_some());
        assert!(WageThresholds::new(5, 5, 5, 5).is_some());
        assert!(WageThresholds::new(2, 1, 3, 4).is_none());
        assert!(WageThresholds::new(1, 2, 4, 3).is_none());
    }

    #[test]
    fn invalid_levels_name_the_pair() {
        let err = WageThresholds::from_levels("41860", "15-1252", [9, 8, 7, 6]).unwrap_err();
        assert!(err.to_string().contains("41860"));
        assert!(err.to_string().contains("15-1252"));
    }

    #[test]
    fn level_lookup() {
        let t = WageThresholds::new(10, 20, 30, 40).unwrap();
        assert_eq!(t.level(0), None);
        assert_eq!(t.level(3), Some(30));
        assert_eq!(t.level(5), None);
    }
}
