//! Q-table save/load
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, then rename over the save)
//!
//! The simulation never touches disk; drivers call this explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::agent::QTable;

/// Envelope version written by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("q-table i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("q-table json is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported q-table format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// On-disk layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    /// Rounds played when the table was saved
    pub rounds: u32,
    pub entries: QTable,
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `table` to `path`, replacing any previous save
pub fn save_q_table(path: impl AsRef<Path>, table: &QTable, rounds: u32) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let envelope = Envelope {
        version: FORMAT_VERSION,
        rounds,
        entries: table.clone(),
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    log::info!("Saved {} q-table entries to {}", table.len(), path.display());
    Ok(())
}

/// Read a table written by [`save_q_table`]
pub fn load_q_table(path: impl AsRef<Path>) -> Result<Envelope, PersistenceError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let envelope: Envelope = serde_json::from_str(&json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }

    log::info!(
        "Loaded {} q-table entries ({} rounds) from {}",
        envelope.entries.len(),
        envelope.rounds,
        path.display()
    );
    Ok(envelope)
}
