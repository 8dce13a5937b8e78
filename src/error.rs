use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning a structured document into a [`ConfigBox`](crate::ConfigBox).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file is empty: {}", path.display())]
    Empty { path: PathBuf },
    #[error("expected a key/value mapping, found {found}")]
    NotAMapping { found: &'static str },
    #[error("non-finite number {value} at '{key}' cannot be represented")]
    NonFiniteNumber { key: String, value: f64 },
    #[error("unsupported mapping key at '{key}': keys must be scalars")]
    UnsupportedKey { key: String },
    #[error("missing configuration key '{key}'")]
    MissingKey { key: String },
    #[error("invalid value for '{key}': {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the file and serialization helpers in [`common`](crate::common).
#[derive(Debug, Error)]
pub enum CommonError {
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to (de)serialize JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to (de)serialize binary {}: {source}", path.display())]
    Binary {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CommonError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
