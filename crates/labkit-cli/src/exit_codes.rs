//! Exit codes for the labkit CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//! `labkit run` is the exception: it exits with the child's own status.

use labkit_common::Error;

/// Exit codes for labkit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation succeeded
    Ok = 0,

    /// Operation completed but reported a negative result
    Failed = 1,

    /// Parameter reference did not parse
    MalformedParameter = 10,

    /// No property file under the resolved name
    NotFound = 11,

    /// Property file could not be parsed
    InvalidFile = 12,

    /// I/O error
    IoError = 13,

    /// External command could not be started
    CommandError = 30,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Ok)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::MalformedParameter { .. } => ExitCode::MalformedParameter,
            Error::PropertyFileNotFound { .. } => ExitCode::NotFound,
            Error::InvalidPropertyFile { .. } => ExitCode::InvalidFile,
            Error::CommandSpawn { .. } | Error::EmptyCommand => ExitCode::CommandError,
            Error::Io(_) => ExitCode::IoError,
            Error::NoDefaultVariant { .. } | Error::Hostname(_) | Error::Json(_) => {
                ExitCode::InternalError
            }
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
