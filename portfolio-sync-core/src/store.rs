//! JSON-file record store.
//!
//! The full table lives in one JSON snapshot keyed by repository name. Every
//! upsert rewrites the snapshot through a temp-file-then-rename, so a crash
//! mid-flush never corrupts previously committed records.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::contract::{ProjectRecord, RecordStore, StoreError};

/// File-backed [`RecordStore`]. Single-writer discipline: the whole table is
/// guarded by one mutex and flushed after each upsert.
pub struct JsonRecordStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, ProjectRecord>>,
}

impl JsonRecordStore {
    /// Open the store at `path`, loading any existing snapshot. A missing
    /// file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: BTreeMap<String, ProjectRecord> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };
        info!(
            path = %path.display(),
            records = records.len(),
            "Opened record store"
        );
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    fn snapshot_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn flush(&self, records: &BTreeMap<String, ProjectRecord>) -> Result<(), StoreError> {
        let dir = self.snapshot_dir();
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "Flushed record store snapshot");
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn get(&self, repo_name: &str) -> Result<Option<ProjectRecord>, StoreError> {
        let records = self.records.lock().expect("record store mutex poisoned");
        Ok(records.get(repo_name).cloned())
    }

    fn upsert(&self, record: &ProjectRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("record store mutex poisoned");
        records.insert(record.repo_name.clone(), record.clone());
        self.flush(&records)
    }
}
