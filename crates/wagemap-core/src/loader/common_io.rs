// crates/wagemap-core/src/loader/common_io.rs
use crate::error::{Result, WageError};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Gunzip `bytes` if they carry the gzip magic, otherwise pass them through.
pub fn maybe_gunzip(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !is_gzip(&bytes) {
        return Ok(bytes);
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let mut out = Vec::with_capacity(bytes.len() * 4);
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(WageError::InvalidData(
            "gzip input but 'compact' disabled".into(),
        ))
    }
}

/// Gzip `bytes` when the target path ends in `.gz`.
pub fn maybe_gzip(path: &Path, bytes: Vec<u8>) -> Result<Vec<u8>> {
    let wants_gzip = path.extension().is_some_and(|e| e == "gz");
    if !wants_gzip {
        return Ok(bytes);
    }
    gzip(bytes)
}

pub fn gzip(bytes: Vec<u8>) -> Result<Vec<u8>> {
    #[cfg(feature = "compact")]
    {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes)?;
        Ok(encoder.finish()?)
    }

    #[cfg(not(feature = "compact"))]
    {
        let _ = bytes;
        Err(WageError::InvalidData(
            "Gzip requested but 'compact' disabled".into(),
        ))
    }
}

/// Map a file-open failure to `NotFound` when the file is simply absent.
pub fn open_error(what: &str, path: &Path, e: std::io::Error) -> WageError {
    if e.kind() == std::io::ErrorKind::NotFound {
        WageError::NotFound(format!("{what} not found at {}: {e}", path.display()))
    } else {
        WageError::Io(e)
    }
}
