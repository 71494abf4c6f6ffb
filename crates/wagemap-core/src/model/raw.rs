// crates/wagemap-core/src/model/raw.rs

//! Raw table shapes as they arrive from the data-loading collaborator.
//!
//! These mirror the JSON files one-to-one and carry no invariants; they are
//! validated and indexed by [`WageDataset::from_raw`](super::WageDataset::from_raw).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// A JSON object decoded as a list of entries in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable<T>(pub Vec<(String, T)>);

impl<T> OrderedTable<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn push(&mut self, key: impl Into<String>, value: T) {
        self.0.push((key.into(), value));
    }
}

impl<T> Default for OrderedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for OrderedTable<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Serialize> Serialize for OrderedTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
            type Value = OrderedTable<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by string")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, T>()? {
                    entries.push((k, v));
                }
                Ok(OrderedTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// `geography.json` value: `{ areaName, state, counties }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographyRaw {
    pub area_name: String,
    pub state: String,
    #[serde(default)]
    pub counties: Vec<String>,
}

/// `counties.json` value: `{ area, areaName, state, county }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyRaw {
    pub area: String,
    #[serde(default)]
    pub area_name: String,
    pub state: String,
    pub county: String,
}

/// `occupations.json` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationRaw {
    pub code: String,
    pub title: String,
}

/// Area code -> occupation code -> `[l1, l2, l3, l4]` (annual dollars).
pub type WagesRaw = OrderedTable<BTreeMap<String, [u64; 4]>>;

/// All four tables, exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTables {
    pub wages: WagesRaw,
    pub geography: OrderedTable<GeographyRaw>,
    pub counties: OrderedTable<CountyRaw>,
    pub occupations: Vec<OccupationRaw>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_table_keeps_file_order() {
        let json = r#"{"zeta": 1, "alpha": 2, "mid": 3}"#;
        let table: OrderedTable<u32> = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn county_entry_uses_camel_case() {
        let json = r#"{"area":"41860","areaName":"San Francisco","state":"CA","county":"Marin County"}"#;
        let c: CountyRaw = serde_json::from_str(json).unwrap();
        assert_eq!(c.area_name, "San Francisco");
        assert_eq!(c.county, "Marin County");
    }

    #[test]
    fn rejects_non_object_table() {
        assert!(serde_json::from_str::<OrderedTable<u32>>("[1,2]").is_err());
    }
}
