//! Configuration loading from file system
//!
//! Reads an optional JSON config file into `SyncConfig`. Missing fields
//! fall back to defaults; an unreadable or invalid file falls back entirely.

use std::path::Path;
use tracing::{info, instrument};

use super::types::SyncConfig;
use crate::error::{Result, StoryboardError};

/// Load configuration from `path`, or defaults when no path is given.
///
/// Returns `SyncConfig::default()` if the file is missing or invalid.
#[instrument(name = "load_config", level = "debug")]
pub fn load_config(path: Option<&Path>) -> SyncConfig {
    let Some(path) = path else {
        return SyncConfig::default();
    };

    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return SyncConfig::default();
    }

    match read_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            e.log("Failed to load config, using defaults");
            SyncConfig::default()
        }
    }
}

/// Read and parse a JSON config file.
pub fn read_config(path: &Path) -> Result<SyncConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| StoryboardError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str::<SyncConfig>(&text).map_err(|source| StoryboardError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}
