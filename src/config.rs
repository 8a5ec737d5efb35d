//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sketchtoe_core::{BoardLayout, ClassifierThresholds, TiltThresholds, DEFAULT_BOARD_SIZE};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "SKETCHTOE_CONFIG";

/// Settings shared by every front end.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Edge length of the square drawing surface.
    board_size: f64,

    /// Tilt hysteresis band.
    orientation: TiltThresholds,

    /// Shape classifier thresholds.
    classifier: ClassifierThresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            orientation: TiltThresholds::default(),
            classifier: ClassifierThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config source: explicit path, then
    /// [`CONFIG_ENV_VAR`], then built-in defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks that the settings describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = self.board_size.is_finite() && self.board_size > 0.0;
        if !positive {
            return Err(ConfigError::new(format!(
                "board_size must be a positive number, got {}",
                self.board_size
            )));
        }
        // A NaN bound fails this and is rejected.
        let ordered = self.orientation.unflip_below < self.orientation.flip_above;
        if !ordered {
            return Err(ConfigError::new(format!(
                "orientation.unflip_below ({}) must be below orientation.flip_above ({})",
                self.orientation.unflip_below, self.orientation.flip_above
            )));
        }
        if self.classifier.min_points == 0 {
            return Err(ConfigError::new("classifier.min_points must be at least 1"));
        }
        Ok(())
    }

    /// Surface layout for these settings.
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(self.board_size)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.layout().cell_dim(), 100.0);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            board_size = 600.0

            [orientation]
            flip_above = 50.0

            [classifier]
            min_points = 8
            "#,
        )
        .unwrap();
        assert_eq!(*config.board_size(), 600.0);
        assert_eq!(config.orientation().flip_above, 50.0);
        assert_eq!(config.orientation().unflip_below, 30.0);
        assert_eq!(config.classifier().min_points, 8);
        assert_eq!(config.classifier().o_aspect_max, 2.0);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [orientation]
            flip_above = 20.0
            unflip_below = 40.0
            "#,
        )
        .unwrap_err();
        assert!(err.message.contains("unflip_below"));
    }

    #[test]
    fn test_non_positive_board_rejected() {
        assert!(AppConfig::from_toml("board_size = 0.0").is_err());
        assert!(AppConfig::from_toml("board_size = -10.0").is_err());
    }

    #[test]
    fn test_nan_band_rejected() {
        let mut config = AppConfig::default();
        config.orientation.flip_above = f64::NAN;
        assert!(config.validate().is_err());
        config.orientation.flip_above = 60.0;
        config.board_size = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_points_rejected() {
        let err = AppConfig::from_toml("[classifier]\nmin_points = 0").unwrap_err();
        assert!(err.message.contains("min_points"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml("board_size = \"big\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
