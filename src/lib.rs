//! seccheat - security cheat sheets in your terminal
//!
//! Cheat sheets are plain JSON files in a data directory (`cheatsheets/` by
//! default). Each file holds an array of records:
//!
//! ```json
//! [
//!   {
//!     "title": "Nmap port scan",
//!     "description": "Basic port and service version detection",
//!     "command": "nmap -sV -sC target.com",
//!     "tags": ["network", "scan"],
//!     "category": "Network Security"
//!   }
//! ]
//! ```
//!
//! Every field is optional. All files are merged into one list when loaded;
//! new records are appended to a single canonical file (`data.json`).
//!
//! # Quick Start
//!
//! ```no_run
//! use seccheat::{search, Catalog, Config, NewRecord, RecordStore};
//!
//! let config = Config::load();
//! let catalog = Catalog::load(&config.data_dir()).unwrap();
//! let hits = search::filter_by_keyword(&catalog.records, "nmap");
//! println!("{} of {} records match", hits.len(), catalog.len());
//!
//! let store = RecordStore::new(&config.data_dir(), &config.data.canonical_file);
//! let record = NewRecord {
//!     title: "Whoami".into(),
//!     command: "id".into(),
//!     category: "System Security".into(),
//!     ..NewRecord::default()
//! }
//! .validate()
//! .unwrap();
//! store.append(&record).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod init;
pub mod record;
pub mod search;
pub mod store;
pub mod tui;

pub use catalog::{Catalog, SkippedFile};
pub use config::Config;
pub use error::{Error, Result};
pub use record::{NewRecord, Record};
pub use search::{CategoryFilter, Query};
pub use store::{RecordStore, CANONICAL_FILE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Core types are usable from the crate root
        assert_eq!(CANONICAL_FILE, "data.json");
        assert!(Query::default().is_empty());
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);

        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path(), CANONICAL_FILE);
        assert_eq!(store.path(), tmp.path().join("data.json"));
        assert!(Catalog::load(tmp.path()).unwrap().is_empty());
    }
}
