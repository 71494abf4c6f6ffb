// crates/wagemap-core/src/model/dataset.rs
use super::raw::RawTables;
use super::{AreaInfo, CountyDirectoryEntry, CountyMatch, DatasetStats, Occupation, WageThresholds};
use crate::error::{Result, WageError};
use crate::text::fold_key;
use std::collections::HashMap;

/// Queries shorter than this (in characters) never match.
pub const MIN_SEARCH_LEN: usize = 2;

/// Immutable reference data: thresholds, areas, the county directory and
/// the occupation list.
///
/// Built once from [`RawTables`] and never mutated afterwards. Area,
/// directory and occupation order is load order.
#[derive(Debug, Clone, Default)]
pub struct WageDataset {
    wages: HashMap<String, HashMap<String, WageThresholds>>,
    areas: Vec<AreaInfo>,
    area_index: HashMap<String, usize>,
    directory: Vec<CountyDirectoryEntry>,
    /// `fold_key` of each directory key, same order as `directory`.
    folded_keys: Vec<String>,
    occupations: Vec<Occupation>,
    occupation_index: HashMap<String, usize>,
}

impl WageDataset {
    /// **Standard Converter:** Raw -> indexed dataset.
    ///
    /// Fails on a threshold quadruple that is not ascending or on a
    /// duplicate occupation code; no partially valid dataset is returned.
    pub fn from_raw(raw: RawTables) -> Result<Self> {
        let mut wages = HashMap::with_capacity(raw.wages.len());
        for (area, by_occupation) in raw.wages {
            let mut entries = HashMap::with_capacity(by_occupation.len());
            for (occupation, levels) in by_occupation {
                let t = WageThresholds::from_levels(&area, &occupation, levels)?;
                entries.insert(occupation, t);
            }
            wages.insert(area, entries);
        }

        let mut areas = Vec::with_capacity(raw.geography.len());
        let mut area_index = HashMap::with_capacity(raw.geography.len());
        for (code, g) in raw.geography {
            area_index.insert(code.clone(), areas.len());
            areas.push(AreaInfo {
                area_code: code,
                area_name: g.area_name,
                state: g.state,
                counties: g.counties,
            });
        }

        let directory: Vec<CountyDirectoryEntry> = raw
            .counties
            .into_iter()
            .map(|(key, c)| CountyDirectoryEntry {
                key,
                county: c.county,
                state: c.state,
                area_code: c.area,
                area_name: c.area_name,
            })
            .collect();

        let folded_keys = directory.iter().map(|e| fold_key(&e.key)).collect();

        let mut occupations = Vec::with_capacity(raw.occupations.len());
        let mut occupation_index = HashMap::with_capacity(raw.occupations.len());
        for o in raw.occupations {
            if occupation_index.contains_key(&o.code) {
                return Err(WageError::InvalidData(format!(
                    "duplicate occupation code {}",
                    o.code
                )));
            }
            occupation_index.insert(o.code.clone(), occupations.len());
            occupations.push(Occupation {
                code: o.code,
                title: o.title,
            });
        }

        Ok(Self {
            wages,
            areas,
            area_index,
            directory,
            folded_keys,
            occupations,
            occupation_index,
        })
    }

    /// Thresholds for an (area, occupation) pair; `None` when either key is
    /// absent.
    pub fn thresholds(&self, area_code: &str, occupation_code: &str) -> Option<WageThresholds> {
        self.wages.get(area_code)?.get(occupation_code).copied()
    }

    pub fn area_info(&self, area_code: &str) -> Option<&AreaInfo> {
        self.area_index.get(area_code).map(|&i| &self.areas[i])
    }

    /// All areas in load order.
    pub fn areas(&self) -> &[AreaInfo] {
        &self.areas
    }

    /// The raw county directory in load order.
    pub fn directory(&self) -> &[CountyDirectoryEntry] {
        &self.directory
    }

    /// Occupations in load order.
    pub fn occupations(&self) -> &[Occupation] {
        &self.occupations
    }

    pub fn occupation(&self, code: &str) -> Option<&Occupation> {
        self.occupation_index.get(code).map(|&i| &self.occupations[i])
    }

    /// Case-insensitive substring search over the raw `"County, State"` keys.
    ///
    /// Results follow directory order and stop at `limit`. Queries shorter
    /// than [`MIN_SEARCH_LEN`] characters return nothing.
    pub fn search_counties(&self, query: &str, limit: usize) -> Vec<CountyMatch> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Vec::new();
        }
        let q = fold_key(query);
        self.directory
            .iter()
            .zip(&self.folded_keys)
            .filter(|(_, folded)| folded.contains(&q))
            .take(limit)
            .map(|(e, _)| CountyMatch::from(e))
            .collect()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            areas: self.areas.len(),
            counties: self.directory.len(),
            occupations: self.occupations.len(),
            wage_entries: self.wages.values().map(HashMap::len).sum(),
        }
    }
}
