//! Error types for configuration resolution and flag binding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while binding and resolving configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// An environment assignment did not have the `KEY=VALUE` shape.
    #[error("invalid environment variable: {0}")]
    InvalidEnvVar(String),

    /// A resolved flag value is not acceptable for that flag.
    #[error("flag \"{flag}\" has invalid value \"{value}\"")]
    InvalidFlagValue { flag: String, value: String },

    /// The config file exists but could not be read.
    #[error("failed reading config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contents are not valid for its format.
    #[error("invalid config file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The config file extension is not one of the supported formats.
    #[error("unsupported config format for file {}", .path.display())]
    UnsupportedConfigFormat { path: PathBuf },

    /// The config file could not be written.
    #[error("failed writing config file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither an explicit file nor a user configuration directory is available.
    #[error("no configuration directory available; pass --config-file")]
    NoConfigDir,
}

impl Error {
    /// True when the underlying I/O failure means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ConfigRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
