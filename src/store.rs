//! Record store
//!
//! Appends records to the canonical file with a read-modify-write cycle:
//! take the lock, read the current array, push, write a temp file in the same
//! directory and rename it into place. A crash or I/O error at any point
//! leaves the previous file untouched.
//!
//! Existing entries are carried as raw JSON text, so an append never
//! rewrites what is already in the file (number formats, escapes and key
//! order stay exactly as written).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::value::RawValue;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{lock_path, Error, Result};
use crate::record::Record;

/// Default canonical file name inside the data directory
pub const CANONICAL_FILE: &str = "data.json";

/// Writer for the canonical cheat sheet file
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        Self {
            path: data_dir.join(file_name),
        }
    }

    /// Path of the canonical file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the canonical file on its own. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Record>> {
        Ok(self
            .read_raw()?
            .iter()
            .filter_map(|raw| serde_json::from_str::<Value>(raw.get()).ok())
            .filter_map(Record::from_value)
            .collect())
    }

    /// Append one record and return the new record count
    pub fn append(&self, record: &Record) -> Result<usize> {
        let _lock = WriteLock::acquire(&self.path)?;

        let mut items = self.read_raw()?;
        items.push(self.encode_entry(record)?);
        self.write_atomic(&items)?;

        tracing::info!(file = %self.path.display(), count = items.len(), "appended record");
        Ok(items.len())
    }

    /// Replace the whole file with `records`
    pub fn write_all(&self, records: &[Record]) -> Result<()> {
        let _lock = WriteLock::acquire(&self.path)?;

        let items = records
            .iter()
            .map(|r| self.encode_entry(r))
            .collect::<Result<Vec<_>>>()?;
        self.write_atomic(&items)?;

        tracing::info!(file = %self.path.display(), count = items.len(), "wrote data file");
        Ok(())
    }

    /// Current contents as raw JSON text per element, so existing entries are
    /// written back exactly as they were read
    fn read_raw(&self) -> Result<Vec<Box<RawValue>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        serde_json::from_str::<Vec<Box<RawValue>>>(&contents).map_err(|e| {
            let reason = if serde_json::from_str::<Value>(&contents).is_ok() {
                "top-level JSON value is not an array".to_string()
            } else {
                e.to_string()
            };
            Error::CorruptStore {
                path: self.path.clone(),
                reason,
            }
        })
    }

    /// Pretty-printed entry, indented to sit one level inside the array
    fn encode_entry(&self, record: &Record) -> Result<Box<RawValue>> {
        let pretty = serde_json::to_string_pretty(&record.to_value())
            .map_err(|e| Error::json(&self.path, e))?;
        // JSON strings cannot hold raw newlines, so every line break is structural
        let indented = pretty.lines().collect::<Vec<_>>().join("\n  ");
        RawValue::from_string(indented).map_err(|e| Error::json(&self.path, e))
    }

    fn write_atomic(&self, items: &[Box<RawValue>]) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        let encoded = serde_json::to_string_pretty(items).map_err(|e| Error::json(&self.path, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        write_synced(&mut tmp, encoded.as_bytes()).map_err(|e| Error::io(tmp.path(), e))?;

        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        Ok(())
    }
}

fn write_synced(tmp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.as_file().sync_all()
}

/// Exclusive write lock, held for the duration of a read-modify-write cycle.
/// The lock file is removed on drop. A process killed mid-write leaves it
/// behind; it then has to be deleted by hand (see `Error::Locked`).
#[derive(Debug)]
struct WriteLock {
    path: PathBuf,
}

impl WriteLock {
    fn acquire(target: &Path) -> Result<Self> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let path = lock_path(target);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // Owner pid, so a stale lock left by a killed process can be identified
                let _ = writeln!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(Error::Locked {
                path: target.to_path_buf(),
            }),
            Err(e) => Err(Error::io(&path, e)),
        }
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
