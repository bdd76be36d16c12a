use super::{Snapshot, Unreadable};
use crate::error::{PoolError, Result};
use crate::types::model::Extra;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DEFAULT_SNAPSHOT_FILE: &str = "pool.json";

/// SHA-256 of the stored bytes at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(pub String);

#[derive(Debug, Clone)]
pub struct Loaded {
    pub snapshot: Snapshot,
    pub revision: Revision,
}

pub trait Store {
    fn load(&self) -> Result<Loaded>;

    /// Persists `snapshot` only if the stored data still matches `expected`.
    fn save(&self, snapshot: &Snapshot, expected: &Revision) -> Result<Revision>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_SNAPSHOT_FILE))
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PoolError::SnapshotNotFound(self.path.display().to_string()),
            _ => PoolError::Io(e),
        })
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Loaded> {
        let bytes = self.read_bytes()?;
        let snapshot = decode_snapshot(&bytes)
            .map_err(|e| PoolError::SnapshotParse(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!(
            path = %self.path.display(),
            categories = snapshot.categories.len(),
            nominees = snapshot.nominees.len(),
            predictions = snapshot.predictions.len(),
            "snapshot loaded"
        );
        Ok(Loaded {
            snapshot,
            revision: revision_of(&bytes),
        })
    }

    fn save(&self, snapshot: &Snapshot, expected: &Revision) -> Result<Revision> {
        let current = revision_of(&self.read_bytes()?);
        if &current != expected {
            return Err(PoolError::Conflict(self.path.display().to_string()));
        }

        let json = encode_snapshot(snapshot)?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(PoolError::Io)?;
        tmp.write_all(json.as_bytes()).map_err(PoolError::Io)?;
        tmp.as_file().sync_all().map_err(PoolError::Io)?;
        tmp.persist(&self.path).map_err(|e| PoolError::Io(e.error))?;
        tracing::info!(
            path = %self.path.display(),
            kept_unreadable = snapshot.unreadable.len(),
            "snapshot saved"
        );
        Ok(revision_of(json.as_bytes()))
    }
}

pub fn revision_of(bytes: &[u8]) -> Revision {
    let digest = Sha256::digest(bytes);
    Revision(format!("{digest:x}"))
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    categories: Option<Vec<Value>>,
    #[serde(default)]
    nominees: Option<Vec<Value>>,
    #[serde(default)]
    predictions: Option<Vec<Value>>,
    #[serde(default)]
    settings: Option<Vec<Value>>,
    #[serde(flatten)]
    extra: Extra,
}

/// Decodes a snapshot. Records that do not fit their shape are set aside in
/// `Snapshot::unreadable` instead of failing the whole document.
pub fn decode_snapshot(bytes: &[u8]) -> std::result::Result<Snapshot, serde_json::Error> {
    let raw: RawSnapshot = serde_json::from_slice(bytes)?;
    let mut unreadable = Unreadable::default();
    let snapshot = Snapshot {
        categories: decode_records("category", raw.categories, &mut unreadable.categories),
        nominees: decode_records("nominee", raw.nominees, &mut unreadable.nominees),
        predictions: decode_records("prediction", raw.predictions, &mut unreadable.predictions),
        settings: decode_records("settings", raw.settings, &mut unreadable.settings),
        extra: raw.extra,
        unreadable,
    };
    Ok(snapshot)
}

fn decode_records<T: DeserializeOwned>(
    kind: &str,
    records: Option<Vec<Value>>,
    unreadable: &mut Vec<(usize, Value)>,
) -> Vec<T> {
    let mut decoded = Vec::new();
    for (position, record) in records.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value(record.clone()) {
            Ok(value) => decoded.push(value),
            Err(e) => {
                tracing::warn!(kind, position, error = %e, "skipping malformed record");
                unreadable.push((position, record));
            }
        }
    }
    decoded
}

/// Serializes a snapshot with its unreadable records restored in place.
pub fn encode_snapshot(snapshot: &Snapshot) -> std::result::Result<String, serde_json::Error> {
    let mut document = serde_json::to_value(snapshot)?;
    let sections = [
        ("categories", &snapshot.unreadable.categories),
        ("nominees", &snapshot.unreadable.nominees),
        ("predictions", &snapshot.unreadable.predictions),
        ("settings", &snapshot.unreadable.settings),
    ];
    for (key, records) in sections {
        if let Some(Value::Array(items)) = document.get_mut(key) {
            // Ascending positions, so earlier inserts do not shift later ones.
            for (position, record) in records {
                items.insert((*position).min(items.len()), record.clone());
            }
        }
    }
    serde_json::to_string_pretty(&document)
}
