//! Error types for labkit.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for labkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for labkit.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("malformed parameter reference: {input:?}")]
    MalformedParameter { input: String },

    #[error("no property file found for {:?} (searched {})", .name, display_paths(.searched))]
    PropertyFileNotFound { name: String, searched: Vec<PathBuf> },

    #[error("invalid property file {name:?} at line {line}: {reason}")]
    InvalidPropertyFile {
        name: String,
        line: usize,
        reason: String,
    },

    // Enum mapping errors (20-29)
    #[error("no {type_name} matches {value:?} and no default is defined")]
    NoDefaultVariant {
        type_name: &'static str,
        value: Option<String>,
    },

    // OS command errors (30-39)
    #[error("failed to run command {command:?}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command must name a program")]
    EmptyCommand,

    // System information errors (40-49)
    #[error("hostname retrieval failed: {0}")]
    Hostname(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::MalformedParameter { .. } => 10,
            Error::PropertyFileNotFound { .. } => 11,
            Error::InvalidPropertyFile { .. } => 12,
            Error::NoDefaultVariant { .. } => 20,
            Error::CommandSpawn { .. } => 30,
            Error::EmptyCommand => 31,
            Error::Hostname(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
