//! Sample data for `seccheat init`
//!
//! `init` creates the data directory and overwrites the canonical file with a
//! small starter set. Nothing else seeds data: a fresh data directory stays
//! empty until `init` runs (or the browser's seed action is used).

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::record::Record;
use crate::store::RecordStore;

/// What `init` wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSummary {
    pub data_dir: PathBuf,
    pub file: PathBuf,
    pub count: usize,
}

/// The starter cheat sheets
pub fn sample_records() -> Vec<Record> {
    vec![
        sample(
            "SQL injection detection",
            "Detect SQL injection with sqlmap",
            "sqlmap -u 'http://test.com?id=1' --batch",
            &["web", "sql", "injection"],
            "Web Security",
        ),
        sample(
            "Nmap port scan",
            "Basic port and service version detection",
            "nmap -sV -sC target.com",
            &["network", "scan", "nmap"],
            "Network Security",
        ),
        sample(
            "Linux system info",
            "Show kernel and distribution details",
            "uname -a && cat /etc/os-release",
            &["system", "linux", "info"],
            "System Security",
        ),
    ]
}

fn sample(title: &str, description: &str, command: &str, tags: &[&str], category: &str) -> Record {
    Record {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        command: Some(command.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: Some(category.to_string()),
        ..Record::default()
    }
}

/// Create the data directory and overwrite the canonical file with samples
pub fn init(config: &Config) -> Result<InitSummary> {
    let data_dir = config.data_dir();
    let store = RecordStore::new(&data_dir, &config.data.canonical_file);
    let records = sample_records();
    store.write_all(&records)?;

    Ok(InitSummary {
        file: store.path().to_path_buf(),
        data_dir,
        count: records.len(),
    })
}
