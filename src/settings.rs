//! # Settings
//!
//! Runtime settings, loaded from a TOML file. Every field has a default, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! ```toml
//! [orchestrator]
//! default_priority = 100
//! init_timeout_ms = 5000
//! startup_scene = 1
//!
//! [ui]
//! root_name = "[UI]"
//!
//! [audio]
//! root_name = "[Audio]"
//! sfx_capacity = 8
//! sfx_volume = 1.0
//! bgm_volume = 0.8
//!
//! [values]
//! difficulty = "normal"
//! ```

use module_framework::{OrchestratorConfig, DEFAULT_PRIORITY};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the settings file.
pub const SETTINGS_ENV_VAR: &str = "GAME_FRAMEWORK_CONFIG";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid setting '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorSettings {
    pub default_priority: i32,
    pub init_timeout_ms: Option<u64>,
    pub startup_scene: Option<usize>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            init_timeout_ms: None,
            startup_scene: Some(1),
        }
    }
}

impl OrchestratorSettings {
    pub fn to_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            default_priority: self.default_priority,
            init_timeout: self.init_timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSettings {
    pub root_name: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            root_name: "[UI]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    pub root_name: String,
    /// Maximum number of sound effects playing at once.
    pub sfx_capacity: usize,
    pub sfx_volume: f32,
    pub bgm_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            root_name: "[Audio]".to_string(),
            sfx_capacity: 8,
            sfx_volume: 1.0,
            bgm_volume: 1.0,
        }
    }
}

/// All runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub orchestrator: OrchestratorSettings,
    pub ui: UiSettings,
    pub audio: AudioSettings,
    /// Free-form values served by the Config module.
    pub values: BTreeMap<String, toml::Value>,
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Settings file read");
        Self::from_toml_str(&text)
    }

    /// Loads from `path` if given, else from [`SETTINGS_ENV_VAR`], else defaults.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self, SettingsError> {
        match path.or_else(|| std::env::var_os(SETTINGS_ENV_VAR).map(PathBuf::from)) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.audio.sfx_capacity == 0 {
            return Err(SettingsError::Invalid {
                key: "audio.sfx_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        for (key, volume) in [
            ("audio.sfx_volume", self.audio.sfx_volume),
            ("audio.bgm_volume", self.audio.bgm_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(SettingsError::Invalid {
                    key,
                    message: format!("{volume} is outside 0.0..=1.0"),
                });
            }
        }
        if self.orchestrator.init_timeout_ms == Some(0) {
            return Err(SettingsError::Invalid {
                key: "orchestrator.init_timeout_ms",
                message: "must be positive; omit it to wait indefinitely".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.audio.sfx_capacity, 8);
        assert_eq!(settings.orchestrator.startup_scene, Some(1));
        assert_eq!(settings.orchestrator.to_config(), OrchestratorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_toml_str(
            r#"
            [orchestrator]
            init_timeout_ms = 250

            [audio]
            sfx_capacity = 4

            [values]
            difficulty = "hard"
            lives = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.audio.sfx_capacity, 4);
        assert_eq!(settings.audio.root_name, "[Audio]");
        assert_eq!(
            settings.orchestrator.to_config().init_timeout,
            Some(Duration::from_millis(250))
        );
        assert_eq!(
            settings.values.get("difficulty").and_then(|v| v.as_str()),
            Some("hard")
        );
        assert_eq!(settings.values.get("lives").and_then(|v| v.as_integer()), Some(3));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Settings::from_toml_str("[audio]\nsfx_capacity = 0").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid { key: "audio.sfx_capacity", .. }
        ));
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        let err = Settings::from_toml_str("[audio]\nbgm_volume = 1.5").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid { key: "audio.bgm_volume", .. }
        ));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = Settings::from_toml_str("[audio]\nchannels = 3").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Settings::load("/nonexistent/game.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/game.toml"));
    }
}
