// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings come from a YAML file in the user's config directory and can be
//! overridden on the command line. A missing file is created with defaults;
//! a broken one is reported and ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default seek step for the prev/next buttons.
pub const DEFAULT_SEEK_STEP_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory that receives saved frames
    pub output_root: PathBuf,
    /// Offset applied by the prev/next buttons
    pub seek_step_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            seek_step_ms: DEFAULT_SEEK_STEP_MS,
        }
    }
}

/// `<documents>/frames`, or `./frames` when there is no documents directory.
pub fn default_output_root() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frames")
}

impl AppConfig {
    /// Standard location of the config file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("video-snipper")
            .join("config.yaml")
    }

    /// Load settings from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            let config = Self::default();
            match config.save(path) {
                Ok(()) => log::info!("Created config file at {}", path.display()),
                Err(e) => log::warn!("Could not create config file: {:#}", e),
            }
            return config;
        }

        match Self::read(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file ({:#}), using defaults", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Apply command line overrides on top of the file values.
    pub fn with_overrides(mut self, seek_step_ms: Option<u64>, output_root: Option<PathBuf>) -> Self {
        if let Some(step) = seek_step_ms {
            self.seek_step_ms = step;
        }
        if let Some(root) = output_root {
            self.output_root = root;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.seek_step_ms, 100);
        assert!(config.output_root.ends_with("frames"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = AppConfig::load(&path);

        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = AppConfig {
            output_root: PathBuf::from("/srv/frames"),
            seek_step_ms: 40,
        };

        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path), config);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "seek_step_ms: 250\n").unwrap();

        let config = AppConfig::load(&path);

        assert_eq!(config.seek_step_ms, 250);
        assert_eq!(config.output_root, default_output_root());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "seek_step_ms: [not, a, number]\n").unwrap();

        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn test_command_line_overrides_win() {
        let config = AppConfig::default()
            .with_overrides(Some(33), Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.seek_step_ms, 33);
        assert_eq!(config.output_root, PathBuf::from("/tmp/out"));

        let untouched = AppConfig::default().with_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }
}
