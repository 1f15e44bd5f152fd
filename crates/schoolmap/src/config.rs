//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `SCHOOLMAP_DATA_DIR`, `SCHOOLMAP_SLOT`,
//!    `SCHOOLMAP_GEOCODE_TIMEOUT_MS`.
//! 2. **Config file**: an optional `schoolmap.toml` passed by the host app.
//! 3. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir (via `directories`) | Where the collection slot lives |
//! | `slot` | `schools` | Slot name; the file is `{data_dir}/{slot}.json` |
//! | `geocode_timeout_ms` | `15000` | Reverse-geocoding budget before falling back to coordinates |

use crate::error::{DirectoryError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Directory holding the collection slot.
    #[config(env = "SCHOOLMAP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the slot the collection is stored under.
    #[config(env = "SCHOOLMAP_SLOT", default = "schools")]
    pub slot: String,

    /// Milliseconds to wait for reverse geocoding.
    #[config(env = "SCHOOLMAP_GEOCODE_TIMEOUT_MS", default = 15000)]
    pub geocode_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            slot: crate::store::DEFAULT_SLOT.to_string(),
            geocode_timeout_ms: 15_000,
        }
    }
}

impl DirectoryConfig {
    /// Load from the environment, then the given TOML file (if any), then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// The configured data dir, or the platform default for this app.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("", "", "schoolmap")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| DirectoryError::Config("No home directory to place data in".to_string()))
    }

    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_timeout_ms)
    }
}
