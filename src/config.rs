//! Configuration management for launch-dash.
//!
//! Loaded with figment from defaults, an optional TOML file and
//! `LAUNCH_DASH_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "launch-dash.toml";

/// Prefix for environment overrides, e.g. `LAUNCH_DASH_DATA__PATH`.
pub const ENV_PREFIX: &str = "LAUNCH_DASH_";

/// Application configuration.
///
/// Sources in order of precedence, highest first:
/// 1. Environment variables (`LAUNCH_DASH_` prefix, `__` between sections)
/// 2. TOML config file
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub ui: UiConfig,
}

/// Dataset location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset loaded at startup. When unset the dashboard starts empty and
    /// waits for File → Open.
    pub path: Option<PathBuf>,
}

/// Window and control settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Step of the payload range sliders, in kg.
    pub payload_step: f64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            payload_step: 1000.0,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to parse or validation fails.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ui.payload_step > 0.0) {
            return Err(ConfigError::Validation {
                message: format!(
                    "payload_step must be greater than 0 (got {})",
                    self.ui.payload_step
                ),
            });
        }
        if !(self.ui.window_width > 0.0 && self.ui.window_height > 0.0) {
            return Err(ConfigError::Validation {
                message: format!(
                    "window size must be positive (got {}x{})",
                    self.ui.window_width, self.ui.window_height
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.path, None);
        assert_eq!(config.ui.payload_step, 1000.0);
        assert_eq!(config.ui.window_width, 1200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                [data]
                path = "spacex_launch_dash.csv"

                [ui]
                payload_step = 500.0
                "#,
            )?;
            jail.set_env("LAUNCH_DASH_UI__WINDOW_WIDTH", "1600");

            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(
                config.data.path.as_deref(),
                Some(Path::new("spacex_launch_dash.csv"))
            );
            assert_eq!(config.ui.payload_step, 500.0);
            assert_eq!(config.ui.window_width, 1600.0);
            assert_eq!(config.ui.window_height, 800.0);
            Ok(())
        });
    }

    #[test]
    fn test_custom_path() {
        Jail::expect_with(|jail| {
            jail.create_file("other.toml", "[ui]\npayload_step = 250.0\n")?;
            let config =
                Config::load_from(Some(Path::new("other.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.ui.payload_step, 250.0);
            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_zero_step() {
        let mut config = Config::default();
        config.ui.payload_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_window() {
        let mut config = Config::default();
        config.ui.window_height = -1.0;
        assert!(config.validate().is_err());
    }
}
