use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::ScoreGridConfig;
use crate::error::{ConfigError, Result};

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub stores: StoreConfig,

    /// Scoreline model tuning.
    #[serde(default)]
    pub model: ScoreGridConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Paths of the file-backed stores.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_rules_path")]
    pub rules: PathBuf,

    #[serde(default = "default_matches_path")]
    pub matches: PathBuf,
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("rules.toml")
}

fn default_matches_path() -> PathBuf {
    PathBuf::from("matches.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            rules: default_rules_path(),
            matches: default_matches_path(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, TOML syntax errors, or invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.model.max_goals < 2 || self.model.max_goals > 10 {
            return Err(ConfigError::InvalidValue {
                field: "model.max_goals",
                reason: format!("must be between 2 and 10, got {}", self.model.max_goals),
            }
            .into());
        }
        if !(-1.0..=1.0).contains(&self.model.rho) {
            return Err(ConfigError::InvalidValue {
                field: "model.rho",
                reason: format!("must be in [-1, 1], got {}", self.model.rho),
            }
            .into());
        }
        if let Some(boost) = self.model.boost_override {
            if !(1.0..=2.0).contains(&boost) {
                return Err(ConfigError::InvalidValue {
                    field: "model.boost_override",
                    reason: format!("must be in [1, 2], got {boost}"),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn load_str(content: &str) -> Result<Config> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        Config::load(file.path())
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.stores.rules, PathBuf::from("rules.toml"));
        assert_eq!(config.model.max_goals, 5);
        assert!((config.model.rho + 0.10).abs() < 1e-12);
    }

    #[test]
    fn sections_override_defaults() {
        let config = load_str(
            r#"
[logging]
level = "debug"
format = "json"

[stores]
rules = "conf/rules.toml"
matches = "data/matches.json"

[model]
max_goals = 6
rho = -0.05
"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.stores.rules, PathBuf::from("conf/rules.toml"));
        assert_eq!(config.model.max_goals, 6);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(load_str("[model]\nmax_goals = 1\n").is_err());
        assert!(load_str("[model]\nrho = 1.5\n").is_err());
        assert!(load_str("[model]\nboost_override = 5.0\n").is_err());
    }
}
