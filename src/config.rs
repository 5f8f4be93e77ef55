//! Configuration management for the virtual disk layer
//!
//! Values come from an optional TOML file with `VDISK_*` environment overrides.
//! They are read once at startup; every component is built from the same
//! `DiskConfig`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config";
pub const DEFAULT_STORAGE_ROOT: &str = "./storage";
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Storage layout settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DiskConfig {
    /// Directory holding every disk's physical tree
    /// Environment: VDISK_STORAGE_ROOT
    pub storage_root: String,

    /// Deepest directory nesting allowed below a disk root
    /// Environment: VDISK_MAX_DEPTH
    pub max_depth: usize,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            storage_root: DEFAULT_STORAGE_ROOT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiskConfig {
    pub fn new(storage_root: impl Into<String>, max_depth: usize) -> Self {
        Self {
            storage_root: storage_root.into(),
            max_depth,
        }
    }

    /// Load configuration from ./config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from the named file; a missing file falls back to defaults
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("storage_root", DEFAULT_STORAGE_ROOT)?
            .set_default("max_depth", DEFAULT_MAX_DEPTH as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("VDISK"))
            .build()?;

        let config: DiskConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.storage_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if self.max_depth == 0 {
            return Err(config::ConfigError::Message(
                "max_depth must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
