// crates/wagemap-core/src/resolver.rs

//! # County Resolution
//!
//! Maps a `(county name, state)` pair to a wage-area code, tolerating the
//! spelling drift between the boundary dataset and the wage survey.
//!
//! The lookup table is built in three fixed phases over every source entry
//! (directory rows first, then every county of every area):
//!
//! 1. exact keys `"<County>|<State>"`
//! 2. normalized keys (see [`normalize_county`])
//! 3. Saint/St. variants of each normalized key
//!
//! All three phases share one key space, so an exact key also claims the
//! same string as a normalized key. Every insert is first-writer-wins. A
//! later entry that would point an
//! already claimed key at a different area is rejected and recorded as an
//! [`AliasCollision`], so two counties are never silently cross-linked.

use crate::model::WageDataset;
use crate::text::{compose_key, exact_key, normalize_county, normalized_key, saint_variants};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Build phase that produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Exact,
    Normalized,
    SaintVariant,
}

/// A key that two different areas tried to claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasCollision {
    pub key: String,
    pub kind: KeyKind,
    /// Area that owns the key.
    pub kept: String,
    /// Area whose insert was refused.
    pub rejected: String,
}

#[derive(Debug, Clone, Default)]
pub struct CountyResolver {
    keys: HashMap<String, String>,
    collisions: Vec<AliasCollision>,
}

impl CountyResolver {
    /// Build the lookup table from the directory plus every area's county
    /// list.
    pub fn build(dataset: &WageDataset) -> Self {
        let sources: Vec<(&str, &str, &str)> = dataset
            .directory()
            .iter()
            .map(|e| (e.county.as_str(), e.state.as_str(), e.area_code.as_str()))
            .chain(dataset.areas().iter().flat_map(|a| {
                a.counties
                    .iter()
                    .map(move |c| (c.as_str(), a.state.as_str(), a.area_code.as_str()))
            }))
            .collect();

        let mut r = Self::default();
        for &(county, state, area) in &sources {
            r.claim(KeyKind::Exact, exact_key(county, state), area);
        }
        for &(county, state, area) in &sources {
            r.claim(KeyKind::Normalized, normalized_key(county, state), area);
        }
        for &(county, state, area) in &sources {
            for variant in saint_variants(&normalize_county(county)) {
                r.claim(KeyKind::SaintVariant, compose_key(&variant, state), area);
            }
        }

        log::debug!(
            "county resolver: {} keys from {} entries, {} collisions",
            r.keys.len(),
            sources.len(),
            r.collisions.len()
        );
        r
    }

    fn claim(&mut self, kind: KeyKind, key: String, area: &str) {
        match self.keys.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(area.to_string());
            }
            Entry::Occupied(slot) => {
                if slot.get() != area {
                    log::warn!(
                        "{:?} key {:?} already maps to area {}; ignoring area {}",
                        kind,
                        slot.key(),
                        slot.get(),
                        area
                    );
                    self.collisions.push(AliasCollision {
                        key: slot.key().clone(),
                        kind,
                        kept: slot.get().clone(),
                        rejected: area.to_string(),
                    });
                }
            }
        }
    }

    /// Resolve a county to its wage-area code.
    ///
    /// Tries the exact key, then the normalized key. `None` means "no wage
    /// data" for this county, not an error.
    pub fn resolve(&self, county: &str, state: &str) -> Option<&str> {
        self.keys
            .get(&exact_key(county, state))
            .or_else(|| self.keys.get(&normalized_key(county, state)))
            .map(String::as_str)
    }

    /// Rejected inserts, in build order.
    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
