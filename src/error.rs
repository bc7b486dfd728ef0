use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by rule/match store adapters.
///
/// Store unavailability is the only failure the detection core propagates
/// to callers; everything else degrades to "no data for this market".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}: {source}")]
    ParseRules {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse match file {path}: {source}")]
    ParseMatches {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize rule file: {0}")]
    SerializeRules(#[source] toml::ser::Error),
}

/// Invalid odds supplied to the normalizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    #[error("decimal odds must be greater than 1.0, got {0}")]
    NotAboveOne(f64),

    #[error("{market} takes {expected} outcomes, got {got}")]
    OutcomeCount {
        market: &'static str,
        expected: usize,
        got: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("match {0} not found")]
    MatchNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
