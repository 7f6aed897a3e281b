//! Error types for registration, loading and typed lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Conflicts detected while binding a type to a path.
///
/// These indicate a programming error in the embedding program; `register`
/// turns them into a panic, `try_register` hands them back.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The type already owns a different path.
    #[error("type {type_name} is already in use with path {path}")]
    TypeInUse { type_name: &'static str, path: String },
    /// The path already belongs to another type.
    #[error("path {path} is already in use with type {type_name}")]
    PathInUse { path: String, type_name: &'static str },
    /// One path would be nested inside the other.
    #[error("path {path} overlaps registered path {existing}")]
    PathOverlap { path: String, existing: String },
    /// The path contains an empty segment.
    #[error("invalid config path {path:?}")]
    InvalidPath { path: String },
    /// The zero value could not be represented as a tree.
    #[error("default value of {type_name} is not serializable: {source}")]
    ZeroValue {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned while loading documents or reading typed values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file extension does not map to a known decoder.
    #[error("unsupported config file extension {extension:?} ({})", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
    /// Reading a config file failed.
    #[error("failed to read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON content is malformed.
    #[error("failed to parse json config: {0}")]
    ParseJson(#[source] serde_json::Error),
    /// YAML content is malformed.
    #[error("failed to parse yaml config: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    /// TOML content is malformed.
    #[error("failed to parse toml config: {0}")]
    ParseToml(#[from] toml::de::Error),
    /// File content is not valid UTF-8.
    #[error("config is not valid utf-8: {0}")]
    ParseEncoding(#[from] std::str::Utf8Error),
    /// The requested type was never registered.
    #[error("invalid config type {type_name}")]
    Unregistered { type_name: &'static str },
    /// The type is registered but the document has nothing at its path.
    #[error("no config value at path {path:?} for type {type_name}")]
    MissingPath {
        path: String,
        type_name: &'static str,
    },
    /// The value at the path does not fit the type.
    #[error("failed to decode {type_name} at {path:?}: {source}")]
    ConvertFailed {
        path: String,
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Whether the error came from decoding malformed document text.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ConfigError::ParseJson(_)
                | ConfigError::ParseYaml(_)
                | ConfigError::ParseToml(_)
                | ConfigError::ParseEncoding(_)
        )
    }
}
