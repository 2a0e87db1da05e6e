use std::path::{Path, PathBuf};

use super::model::{HostTable, RawHostRecord};
use crate::error::{Result, VtError};

/// Candidate config locations for `prog`, in lookup order.
pub fn config_candidates(home: &Path, prog: &str) -> [PathBuf; 2] {
    let config_dir = home.join(".config");
    [
        config_dir.join(format!("{}.json", prog)),
        config_dir.join(prog).join(format!("{}.json", prog)),
    ]
}

/// First candidate that exists. Falls back to `~/.config/<prog>.json` so a
/// missing file is reported under its primary name.
pub fn config_path(home: &Path, prog: &str) -> PathBuf {
    let [primary, nested] = config_candidates(home, prog);
    if !primary.exists() && nested.exists() {
        nested
    } else {
        primary
    }
}

/// Parse the JSON array of host records.
pub fn parse_records(content: &str, path: &Path) -> Result<Vec<RawHostRecord>> {
    serde_json::from_str(content).map_err(|source| VtError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the config file into raw records, in file order.
pub fn read_records(path: &Path) -> Result<Vec<RawHostRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| VtError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&content, path)
}

impl HostTable {
    /// Load the host table from a config file.
    /// Dangling `phost` references are logged, not rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let records = read_records(path)?;
        log::debug!("read {} host records from {}", records.len(), path.display());
        let table = HostTable::from_records(records);
        for alias in table.dangling_parents() {
            log::warn!("host '{}' points at a parent host that is not defined", alias);
        }
        Ok(table)
    }
}
