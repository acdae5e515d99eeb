use std::path::PathBuf;

/// Errors that can occur when loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid value in config {path}: {field} {reason}")]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors that can occur while loading a texture. These are logged and
/// otherwise ignored; the object keeps its plain material.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    DecodeError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
