//! Catalog loader
//!
//! Aggregates records from every `*.json` file directly inside the data
//! directory. Files are read in lexicographic file-name order and their
//! records concatenated. A file that cannot be read or parsed is skipped and
//! reported in [`Catalog::skipped`]; it never aborts the load.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::Record;

/// A data file that was left out of the aggregate load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of an aggregate load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedFile>,
    /// Files that contributed records, in load order
    pub files: Vec<PathBuf>,
}

impl Catalog {
    /// Load every JSON file in `dir`, creating the directory if it is missing
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            tracing::info!(dir = %dir.display(), "creating data directory");
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
            return Ok(Self::default());
        }

        let mut catalog = Self::default();
        for path in json_files(dir)? {
            match read_records(&path) {
                Ok(records) => {
                    tracing::debug!(file = %path.display(), count = records.len(), "loaded data file");
                    catalog.records.extend(records);
                    catalog.files.push(path);
                }
                Err(reason) => {
                    tracing::warn!(file = %path.display(), %reason, "skipping data file");
                    catalog.skipped.push(SkippedFile { path, reason });
                }
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// List `*.json` files directly in `dir`, sorted by file name
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_json_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Parse one data file. Errors come back as a human-readable reason.
fn read_records(path: &Path) -> std::result::Result<Vec<Record>, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| e.to_string())?;

    let Value::Array(items) = value else {
        return Err("top-level JSON value is not an array".to_string());
    };

    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
    if records.len() < total {
        tracing::warn!(
            file = %path.display(),
            dropped = total - records.len(),
            "ignoring array elements that are not objects"
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn titles(catalog: &Catalog) -> Vec<&str> {
        catalog.records.iter().map(|r| r.display_title()).collect()
    }

    #[test]
    fn test_missing_directory_is_created_empty() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("cheatsheets");

        let catalog = Catalog::load(&dir).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.skipped.is_empty());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_concatenates_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", r#"[{"title": "b1"}, {"title": "b2"}]"#);
        write(tmp.path(), "a.json", r#"[{"title": "a1"}]"#);
        write(tmp.path(), "c.json", r#"[{"title": "c1"}, {"title": "c2"}, {"title": "c3"}]"#);

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(titles(&catalog), vec!["a1", "b1", "b2", "c1", "c2", "c3"]);
        assert_eq!(catalog.files.len(), 3);
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "broken.json", "[{\"title\": ");
        write(tmp.path(), "good.json", r#"[{"title": "ok", "command": "id"}]"#);

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(titles(&catalog), vec!["ok"]);
        assert_eq!(catalog.skipped.len(), 1);
        assert!(catalog.skipped[0].path.ends_with("broken.json"));
    }

    #[test]
    fn test_non_array_root_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "object.json", r#"{"title": "not in an array"}"#);

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.skipped.len(), 1);
        assert!(catalog.skipped[0].reason.contains("not an array"));
    }

    #[test]
    fn test_ignores_other_files_and_subdirectories() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "notes.txt", r#"[{"title": "txt"}]"#);
        write(tmp.path(), "UPPER.JSON", r#"[{"title": "upper"}]"#);
        fs::create_dir(tmp.path().join("sub.json")).unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        write(&tmp.path().join("nested"), "deep.json", r#"[{"title": "deep"}]"#);

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(titles(&catalog), vec!["upper"]);
    }

    #[test]
    fn test_records_with_missing_fields_still_load() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "data.json", r#"[{"command": "whoami"}, {}, "stray"]"#);

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0].display_title(), "Untitled");
        assert_eq!(catalog.records[0].display_command(), "whoami");
    }
}
