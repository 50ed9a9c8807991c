//! Core error types for moveit-core.
//!
//! All state-machine operations are total; the fallible surfaces are catalog
//! loading, configuration I/O, and the cookie file. Side channels
//! (notification, audio) fail silently and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moveit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog-related errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cookie/session storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Challenge catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read a catalog file
    #[error("Failed to read catalog from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON did not parse
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// A catalog must contain at least one challenge
    #[error("Catalog contains no challenges")]
    Empty,

    /// Challenge XP amounts must be positive
    #[error("Challenge #{index} has a zero XP amount")]
    ZeroAmount { index: usize },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {key}")]
    UnknownKey { key: String },

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Cookie/session storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a storage file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a storage file
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
