//! labkit operating system helpers.
//!
//! - Run an external command and capture its first output line and status
//! - Classify the operating system the process runs on

pub mod os_type;
pub mod runner;

pub use os_type::OsType;
pub use runner::{run, CommandOutput};

pub use labkit_common::{Error, Result};
