//! JSON file store implementation
//!
//! One JSON object per store file, the durable analog of the browser's
//! string-keyed storage. The whole object is loaded at open and rewritten
//! atomically on every mutation; an advisory lock on a sidecar file keeps a
//! second process from opening the same store.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde_json::{Map, Value as JsonValue};
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::store::KvStore;

/// JSON file store
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<Map<String, JsonValue>>,
    // Held for the lifetime of the store; the OS releases the lock on drop
    _lock_file: File,
}

impl JsonFileStore {
    /// Open a store file, creating an empty store if the file is missing
    ///
    /// A file that no longer parses is moved aside to `<name>.corrupt` and
    /// the store starts empty, so a later write cannot destroy the evidence.
    pub fn open(path: &Path) -> Result<Self> {
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(sidecar_path(path, ".lock"))?;
        lock_file.try_lock_exclusive().map_err(|_| {
            Error::storage(format!(
                "store {} is in use by another session",
                path.display()
            ))
        })?;

        let values = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str::<Map<String, JsonValue>>(&content) {
                Ok(values) => values,
                Err(_) => {
                    let _ = std::fs::rename(path, sidecar_path(path, ".corrupt"));
                    Map::new()
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: Mutex::new(values),
            _lock_file: lock_file,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file through a temp file and atomic rename
    fn persist(&self, values: &Map<String, JsonValue>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        let content = serde_json::to_string_pretty(values)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Append a suffix to a file name, e.g. `journal.json` -> `journal.json.lock`
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl KvStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<JsonValue>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: JsonValue) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}
