use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::COLS;

/// Longest pause allowed before quitting on game over.
const MAX_EXIT_DELAY_MS: u64 = 60_000;

/// Log file used when verbose logging is enabled without a configured file.
pub const DEFAULT_LOG_FILE: &str = "connect_four.log";

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing; built-in defaults are in use
    Defaults,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub log: LogConfig,
}

/// Terminal front-end behaviour.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the how-to-play screen before the first game
    pub show_instructions: bool,
    /// Quit automatically once a game is won or drawn
    pub exit_on_game_over: bool,
    /// Pause between game over and quitting, in milliseconds
    pub exit_delay_ms: u64,
    /// Column selected when a game starts
    pub start_column: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_instructions: true,
            exit_on_game_over: false,
            exit_delay_ms: 3000,
            start_column: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level: off, error, warn, info, debug or trace
    pub level: String,
    /// Write log output here instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Parsed form of `level`
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.level.parse().map_err(|_| {
            ConfigError::Validation(format!("log.level '{}' is not a valid level", self.level))
        })
    }

    /// File the logger should write to, if any.
    ///
    /// Logging above `warn` (from `level` or an environment override) while
    /// the game owns the terminal goes to [`DEFAULT_LOG_FILE`] unless a file
    /// is configured.
    pub fn output_file(&self, env_override: bool) -> Result<Option<PathBuf>, ConfigError> {
        if self.file.is_some() {
            return Ok(self.file.clone());
        }
        if env_override || self.level_filter()? > log::LevelFilter::Warn {
            return Ok(Some(PathBuf::from(DEFAULT_LOG_FILE)));
        }
        Ok(None)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist. The returned source tells the caller which happened, so
    /// it can report the fallback once logging is set up.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }
        if self.ui.exit_delay_ms > MAX_EXIT_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "ui.exit_delay_ms must be <= {MAX_EXIT_DELAY_MS}"
            )));
        }
        self.log.level_filter()?;

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
