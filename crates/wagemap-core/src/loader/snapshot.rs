// crates/wagemap-core/src/loader/snapshot.rs

//! Binary snapshot of all four tables in one `bincode` file, for fast
//! startup without JSON parsing.

use super::common_io::{self, open_error};
use crate::error::{Result, WageError};
use crate::model::RawTables;
use bincode::Options;
use std::path::Path;

/// Refuse snapshots that would decode to more than this many bytes.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SNAPSHOT_LIMIT)
}

pub fn write_snapshot(path: impl AsRef<Path>, tables: &RawTables, compression: CompressionMode) -> Result<()> {
    let path = path.as_ref();
    let mut bytes = options().serialize(tables)?;
    if compression == CompressionMode::Gzip {
        bytes = common_io::gzip(bytes)?;
    }
    std::fs::write(path, bytes).map_err(WageError::Io)?;
    log::info!("wrote snapshot {}", path.display());
    Ok(())
}

pub fn read_snapshot(path: impl AsRef<Path>) -> Result<RawTables> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| open_error("snapshot", path, e))?;
    snapshot_from_bytes(bytes)
}

/// Decode a snapshot, gzip-compressed or not.
pub fn snapshot_from_bytes(bytes: Vec<u8>) -> Result<RawTables> {
    let bytes = common_io::maybe_gunzip(bytes)?;
    Ok(options().deserialize(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CountyRaw, OccupationRaw};
    use std::collections::BTreeMap;

    fn tables() -> RawTables {
        let mut raw = RawTables::default();
        raw.wages.push("10180", BTreeMap::from([("11-1011".to_string(), [1, 2, 3, 4])]));
        raw.counties.push(
            "Taylor County, TX",
            CountyRaw {
                area: "10180".into(),
                area_name: "Abilene, TX".into(),
                state: "TX".into(),
                county: "Taylor County".into(),
            },
        );
        raw.occupations.push(OccupationRaw {
            code: "11-1011".into(),
            title: "Chief Executives".into(),
        });
        raw
    }

    #[test]
    fn snapshot_file_restores_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wagemap.bin");
        write_snapshot(&path, &tables(), CompressionMode::default()).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), tables());
    }

    #[test]
    fn missing_snapshot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, WageError::NotFound(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(snapshot_from_bytes(vec![0xff; 3]).is_err());
    }
}
