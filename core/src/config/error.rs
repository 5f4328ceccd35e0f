use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the configuration store and its file backing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error accessing {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {path:?}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("serialize error for {path:?}: {source}")]
    TomlSerialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("JSON error for {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("configuration has no backing file")]
    NoPath,

    #[error("cannot descend into `{path}`: a {found} value is stored there")]
    PathConflict { path: String, found: &'static str },

    #[error("configuration path is empty")]
    EmptyPath,
}
