use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::leave_code::LeaveCodeTable;

const DATA_DIR_NAME: &str = ".timepivot";
const CONFIG_FILE_NAME: &str = "config.json";

/// `~/.timepivot`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

/// User settings, read from `~/.timepivot/config.json`. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dataset file to report on; defaults to `dataset.json` in the data directory.
    pub dataset_path: Option<PathBuf>,
    /// Replaces the built-in leave-code table when set.
    pub leave_codes: Option<LeaveCodeTable>,
    /// One of `table`, `json`, `csv`, `xlsx`.
    pub default_format: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(default_data_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn leave_code_table(&self) -> LeaveCodeTable {
        self.leave_codes.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("config.json"))).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.leave_code_table(), LeaveCodeTable::default());
    }

    #[test]
    fn test_leave_codes_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "leave_codes": { "Holiday": "H" }, "default_format": "csv" }"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        let table = config.leave_code_table();

        assert_eq!(config.default_format.as_deref(), Some("csv"));
        assert_eq!(table.lookup("holiday"), Some("H"));
        assert_eq!(table.lookup("vacation"), None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
