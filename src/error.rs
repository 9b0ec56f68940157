//! Error types for cmakegen
//!
//! Library code returns `GenResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cmakegen operations
pub type GenResult<T> = Result<T, GenError>;

/// Main error type for cmakegen operations
#[derive(Error, Debug)]
pub enum GenError {
    /// Listing an existing directory failed
    #[error("failed to scan directory {path}: {source}")]
    ScanDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisting the generated document failed
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the previous output for comparison failed
    #[error("failed to read existing output {path}: {source}")]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed or holds invalid values
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// An explicitly requested config file does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// An explicitly requested config path exists but is not a file
    #[error("config path is not a file: {path}")]
    ConfigNotFile { path: PathBuf },

    /// Config file exists but could not be read
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
