// Application settings
// Loaded from ~/.config/crossgrid/settings.json

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::state::{GRID_COLS, GRID_ROWS, MAX_GRID_DIM};

/// Environment variable overriding the settings file location
pub const SETTINGS_PATH_ENV_VAR: &str = "CROSSGRID_SETTINGS_PATH";

pub const DEFAULT_CELL_SIZE: f32 = 56.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "Grid must have between 1 and {max} rows and columns (got {rows}x{cols})",
        max = MAX_GRID_DIM
    )]
    InvalidDimensions { rows: usize, cols: usize },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Edge length of a cell in the desktop frontend, in pixels
    pub cell_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Settings {
    /// Settings file path, checking the environment variable first
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossgrid")
            .join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |n: usize| (1..=MAX_GRID_DIM).contains(&n);
        if !in_range(self.rows) || !in_range(self.cols) {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.rows, 7);
        assert_eq!(settings.cols, 6);
        assert_eq!(settings.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_settings(r#"{ "rows": 15 }"#);
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.rows, 15);
        assert_eq!(settings.cols, GRID_COLS);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let file = write_settings(r#"{ "rows": 0, "cols": 4 }"#);
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::InvalidDimensions { rows: 0, cols: 4 })
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let file = write_settings(r#"{ "rows": 18446744073709551615, "cols": 2 }"#);
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::InvalidDimensions { rows: usize::MAX, cols: 2 })
        ));

        let file = write_settings(r#"{ "rows": 7, "cols": 101 }"#);
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::InvalidDimensions { rows: 7, cols: 101 })
        ));
    }

    #[test]
    fn test_bad_json() {
        let file = write_settings("rows = 3");
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load_from(&dir.path().join("settings.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
