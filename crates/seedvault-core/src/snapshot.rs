//! Versioned binary snapshots of a settings aggregate
//!
//! Layout: the magic `SVSN`, a little-endian `u16` schema version, then a
//! gzip-compressed JSON envelope holding the settings. Snapshots written by a
//! newer schema are rejected; older ones are migrated forward before decoding.

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Result, SeedVaultError};
use crate::models::settings::SettingsAggregate;

/// File signature
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"SVSN";

/// Schema version written by this build
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + 2;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u16,
    saved_at: DateTime<Utc>,
    settings: Value,
}

/// Header fields of a snapshot, readable without decoding the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub version: u16,
    pub compressed_len: usize,
}

/// Read the header, checking the signature
pub fn inspect(bytes: &[u8]) -> Result<SnapshotInfo> {
    if bytes.len() < HEADER_LEN {
        return Err(snapshot_error(format!(
            "expected at least {} header bytes, found {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    if &bytes[..4] != SNAPSHOT_MAGIC {
        return Err(snapshot_error("not a settings snapshot (bad signature)"));
    }
    Ok(SnapshotInfo {
        version: u16::from_le_bytes([bytes[4], bytes[5]]),
        compressed_len: bytes.len() - HEADER_LEN,
    })
}

impl SettingsAggregate {
    /// Encode into snapshot bytes
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>> {
        let envelope = Envelope {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            settings: serde_json::to_value(self).map_err(|e| SeedVaultError::Serialization(e.to_string()))?,
        };
        let json = serde_json::to_vec(&envelope).map_err(|e| SeedVaultError::Serialization(e.to_string()))?;

        let mut out = Vec::with_capacity(HEADER_LEN + json.len() / 4);
        out.extend_from_slice(SNAPSHOT_MAGIC);
        out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());

        let mut encoder = GzEncoder::new(out, Compression::default());
        encoder.write_all(&json)?;
        Ok(encoder.finish()?)
    }

    /// Decode snapshot bytes, migrating older schema versions
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self> {
        let info = inspect(bytes)?;
        if info.version > SNAPSHOT_VERSION {
            return Err(SeedVaultError::UnsupportedSnapshotVersion {
                found: info.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut json = Vec::new();
        GzDecoder::new(&bytes[HEADER_LEN..])
            .read_to_end(&mut json)
            .map_err(|e| snapshot_error(format!("corrupt payload: {}", e)))?;

        let envelope: Envelope =
            serde_json::from_slice(&json).map_err(|e| snapshot_error(format!("invalid envelope: {}", e)))?;
        if envelope.version != info.version {
            return Err(snapshot_error(format!(
                "header version {} does not match envelope version {}",
                info.version, envelope.version
            )));
        }

        let settings = migrate(envelope.version, envelope.settings)?;
        serde_json::from_value(settings).map_err(|e| SeedVaultError::Serialization(e.to_string()))
    }

    /// Write a snapshot file
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_snapshot_bytes()?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Writing settings snapshot");

        let mut file = fs::File::create(path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }

    /// Read a snapshot file
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Reading settings snapshot");
        Self::from_snapshot_bytes(&bytes)
    }
}

/// Bring settings written by `version` up to [`SNAPSHOT_VERSION`]
fn migrate(version: u16, settings: Value) -> Result<Value> {
    match version {
        SNAPSHOT_VERSION => Ok(settings),
        0 => Err(snapshot_error("schema version 0 is not a valid snapshot version")),
        other => Err(SeedVaultError::UnsupportedSnapshotVersion {
            found: other,
            supported: SNAPSHOT_VERSION,
        }),
    }
}

fn snapshot_error(reason: impl Into<String>) -> SeedVaultError {
    SeedVaultError::Snapshot { reason: reason.into() }
}
