//! Configuration file support for seccheat
//!
//! Reads from .seccheat/config.toml, found by walking up from the current
//! directory. Every setting has a default, so the file is optional.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::ALL_CATEGORIES;
use crate::store::CANONICAL_FILE;

/// Environment variable that overrides the data directory
pub const DIR_ENV: &str = "SECCHEAT_DIR";

/// Name of the data directory when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = "cheatsheets";

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Where cheat sheets live
    #[serde(default)]
    pub data: DataConfig,

    /// Interactive browser settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Diagnostics
    #[serde(default)]
    pub log: LogConfig,

    /// Directory holding `.seccheat/`, used to resolve relative paths
    #[serde(skip)]
    root: Option<PathBuf>,

    /// Data directory forced by the environment or a caller
    #[serde(skip)]
    dir_override: Option<PathBuf>,
}

/// Data location settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    /// Data directory. Relative paths are resolved against the project root
    /// (the directory containing `.seccheat/`).
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File that `add` and `init` write to
    /// Default: "data.json"
    #[serde(default = "default_canonical_file")]
    pub canonical_file: String,
}

/// Browser settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BrowserConfig {
    /// Categories shown as filter buttons
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Additional categories offered by the add form only
    /// Default: ["Other"]
    #[serde(default = "default_extra_categories")]
    pub extra_categories: Vec<String>,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct LogConfig {
    /// File the browser writes diagnostics to. Without it the browser does
    /// not log (the terminal is in use).
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_canonical_file() -> String {
    CANONICAL_FILE.to_string()
}

fn default_categories() -> Vec<String> {
    vec![
        "Web Security".to_string(),
        "Network Security".to_string(),
        "System Security".to_string(),
    ]
}

fn default_extra_categories() -> Vec<String> {
    vec!["Other".to_string()]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            canonical_file: default_canonical_file(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            extra_categories: default_extra_categories(),
        }
    }
}

impl Config {
    /// Load config from .seccheat/config.toml and apply SECCHEAT_DIR.
    /// Returns default config if the file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let mut config = match Self::find_config_path() {
            Some(path) => Self::from_file(&path),
            None => Self::default(),
        };

        if let Ok(dir) = std::env::var(DIR_ENV) {
            if !dir.is_empty() {
                config.dir_override = Some(PathBuf::from(dir));
            }
        }
        config
    }

    /// Parse a specific config file, falling back to defaults on error
    pub fn from_file(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| Self::parse(&contents).map_err(|e| e.to_string()));

        let mut config = match parsed {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "{} ignoring {}: {}",
                    "Warning:".yellow(),
                    path.display(),
                    e
                );
                Self::default()
            }
        };
        // .seccheat/config.toml -> project root is two levels up
        config.root = path.parent().and_then(Path::parent).map(Path::to_path_buf);
        config
    }

    /// Parse config from a TOML string
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Defaults with the data directory pinned to `dir`
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir_override: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(".seccheat").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }

    /// Resolved data directory.
    ///
    /// Order: SECCHEAT_DIR / explicit override, `data.dir` from the config
    /// file, then `cheatsheets/` next to the executable.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir_override {
            return dir.clone();
        }
        if let Some(dir) = &self.data.dir {
            return self.resolve(dir);
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_DATA_DIR)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Resolved browser log file, if configured
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_ref().map(|f| self.resolve(f))
    }

    /// Filter buttons in display order, ending with the "all" sentinel
    pub fn filter_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .browser
            .categories
            .iter()
            .filter(|c| c.as_str() != ALL_CATEGORIES)
            .cloned()
            .collect();
        labels.push(ALL_CATEGORIES.to_string());
        labels
    }

    /// Categories offered by the add form, without duplicates
    pub fn form_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for c in self
            .browser
            .categories
            .iter()
            .chain(self.browser.extra_categories.iter())
        {
            if c != ALL_CATEGORIES && !categories.contains(c) {
                categories.push(c.clone());
            }
        }
        if categories.is_empty() {
            categories = default_extra_categories();
        }
        categories
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.canonical_file, "data.json");
        assert_eq!(config.browser.categories.len(), 3);
        assert_eq!(config.browser.extra_categories, vec!["Other"]);
        assert!(config.log_file().is_none());
        assert!(config.data_dir().ends_with(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[data]
dir = "/srv/cheats"
canonical_file = "mine.json"

[browser]
categories = ["Recon", "Exploit"]
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/srv/cheats"));
        assert_eq!(config.data.canonical_file, "mine.json");
        assert_eq!(config.filter_labels(), vec!["Recon", "Exploit", "All"]);
        assert_eq!(config.form_categories(), vec!["Recon", "Exploit", "Other"]);
    }

    #[test]
    fn test_relative_paths_resolve_against_project_root() {
        let tmp = TempDir::new().unwrap();
        let dot_dir = tmp.path().join(".seccheat");
        std::fs::create_dir_all(&dot_dir).unwrap();
        let path = dot_dir.join("config.toml");
        std::fs::write(
            &path,
            "[data]\ndir = \"notes/cheats\"\n\n[log]\nfile = \"seccheat.log\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path);
        assert_eq!(config.data_dir(), tmp.path().join("notes/cheats"));
        assert_eq!(config.log_file(), Some(tmp.path().join("seccheat.log")));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[data\nthis is not toml").unwrap();

        let config = Config::from_file(&path);
        assert_eq!(config.data.canonical_file, "data.json");
    }

    #[test]
    fn test_override_wins() {
        let mut config = Config::parse("[data]\ndir = \"/from/config\"\n").unwrap();
        config.dir_override = Some(PathBuf::from("/from/env"));
        assert_eq!(config.data_dir(), PathBuf::from("/from/env"));
        assert_eq!(
            Config::with_data_dir("/tmp/x").data_dir(),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn test_sentinel_is_not_duplicated() {
        let config = Config::parse("[browser]\ncategories = [\"All\", \"Web\"]\nextra_categories = [\"Web\"]\n").unwrap();
        assert_eq!(config.filter_labels(), vec!["Web", "All"]);
        assert_eq!(config.form_categories(), vec!["Web"]);
    }
}
