//! Game configuration
//!
//! Defaults match the classic puzzle. A TOML file can override any field:
//!
//! ```toml
//! word_length = 5
//! max_guesses = 6
//! reference_timezone = "UTC"
//! history_cap = 100
//! ```

use crate::daily::ReferenceTimezone;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "daily_wordle";

/// Directory for the store and the log file
///
/// The platform data directory when known, else `./.daily_wordle`.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".").join(".daily_wordle"), |d| d.join(APP_DIR))
}

#[must_use]
pub fn default_store_path() -> PathBuf {
    data_dir().join("store.json")
}

#[must_use]
pub fn default_log_path() -> PathBuf {
    data_dir().join("logs").join("daily_wordle.log")
}

/// Config file read when `--config` is not given, if it exists
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("config.toml"))
        .filter(|path| path.is_file())
}

/// Recognized configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Letters per word. Default: 5.
    pub word_length: usize,
    /// Attempts per puzzle. Default: 6.
    pub max_guesses: usize,
    /// Timezone deciding the calendar day for everyone. Default: UTC.
    pub reference_timezone: ReferenceTimezone,
    /// Completed games kept in the rolling history. Default: 100.
    pub history_cap: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_guesses: 6,
            reference_timezone: ReferenceTimezone::utc(),
            history_cap: 100,
        }
    }
}

impl GameConfig {
    /// Load from a TOML file; missing fields take their defaults
    ///
    /// # Errors
    /// Returns `GameError::Configuration` if the file cannot be read or parsed,
    /// or if the result fails [`GameConfig::validate`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| GameError::Configuration {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns `GameError::Configuration` on parse or validation failure.
    pub fn from_toml_str(raw: &str) -> Result<Self, GameError> {
        let config: Self = toml::from_str(raw).map_err(|e| GameError::Configuration {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Checks:
    /// - `word_length >= 1`
    /// - `max_guesses >= 1` (a puzzle with no attempts can never end in a win)
    /// - `history_cap >= 1`
    ///
    /// # Errors
    /// Returns `GameError::Configuration` naming the first invalid field.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: &str| {
            Err(GameError::Configuration {
                reason: reason.to_string(),
            })
        };

        if self.word_length == 0 {
            return invalid("word_length must be >= 1");
        }
        if self.max_guesses == 0 {
            return invalid("max_guesses must be >= 1");
        }
        if self.history_cap == 0 {
            return invalid("history_cap must be >= 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.word_length, 5);
        assert_eq!(config.max_guesses, 6);
        assert_eq!(config.reference_timezone, ReferenceTimezone::utc());
        assert_eq!(config.history_cap, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            max_guesses = 8
            reference_timezone = "+09:00"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_guesses, 8);
        assert_eq!(config.word_length, 5);
        assert_eq!(
            config.reference_timezone.offset().local_minus_utc(),
            9 * 3600
        );
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_zero_values() {
        for raw in ["word_length = 0", "max_guesses = 0", "history_cap = 0"] {
            let err = GameConfig::from_toml_str(raw).unwrap_err();
            assert!(matches!(err, GameError::Configuration { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_unknown_fields_and_bad_timezones() {
        assert!(GameConfig::from_toml_str("colour = \"green\"").is_err());
        assert!(GameConfig::from_toml_str("reference_timezone = \"Mars/Olympus\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "history_cap = 10\n").unwrap();

        let config = GameConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.history_cap, 10);

        let err = GameConfig::from_toml_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
