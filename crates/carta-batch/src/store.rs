//! Durable persistence for sweep results.
//!
//! One JSON file per configuration key under a caller-chosen root
//! directory. Key derivation (data vintage + λ grid identity) is the
//! caller's responsibility; the payload format is private to this crate —
//! all that matters is that it round-trips the sweep exactly, which JSON
//! does here because `serde_json` prints `f64` values with the shortest
//! representation that parses back to the identical bits.
//!
//! File handles are scoped to `save`/`load` and released on every exit
//! path, including failures. An absent key and a corrupt payload are
//! distinct errors so callers can choose "regenerate" versus "investigate";
//! this crate never regenerates silently.

use crate::sweep::SweepResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry persisted under the key
    #[error("no stored sweep under key '{key}'")]
    NotFound { key: String },

    /// An entry exists but its payload does not parse
    #[error("stored sweep under key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An entry could not be encoded for writing
    #[error("failed to encode sweep for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying file-system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk envelope around a sweep.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSweep {
    created_at: DateTime<Utc>,
    key: String,
    sweep: SweepResult,
}

/// A directory of persisted sweeps, one file per key.
#[derive(Debug, Clone)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    /// Open a store rooted at the given directory. The directory is
    /// created lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Persist a sweep under a key, overwriting any previous entry.
    pub fn save(&self, key: &str, sweep: &SweepResult) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let entry = StoredSweep {
            created_at: Utc::now(),
            key: key.to_string(),
            sweep: sweep.clone(),
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        let path = self.entry_path(key);
        fs::write(&path, json)?;
        debug!(key, path = %path.display(), "sweep saved");
        Ok(())
    }

    /// Load the sweep persisted under a key.
    ///
    /// The reconstructed value equals the saved one field-by-field,
    /// including exact partition arrays, counts, and flags.
    pub fn load(&self, key: &str) -> Result<SweepResult, StoreError> {
        let path = self.entry_path(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(err) => return Err(err.into()),
        };
        let entry: StoredSweep =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            })?;
        debug!(key, "sweep loaded");
        Ok(entry.sweep)
    }

    /// Whether an entry exists under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    /// Keys of all persisted entries, sorted.
    pub fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
