use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};
use crate::vault::GeneratorConfig;

/// Project-level configuration, loaded from `.lockbox.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the vault files.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Length of generated passwords (default: 16).
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Record vault operations in the audit log (default: true).
    #[serde(default = "default_audit")]
    pub audit: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_dir() -> String {
    ".lockbox".to_string()
}

fn default_generator_length() -> usize {
    16
}

fn default_audit() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            generator_length: default_generator_length(),
            audit: default_audit(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<project_dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Full path of the storage directory.
    ///
    /// Example: `project_dir/.lockbox`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_dir)
    }

    /// Generator options with the configured length.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            length: self.generator_length,
            ..GeneratorConfig::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
