//! labkit command line front end.
//!
//! The binary is a thin shell over the library crates: argument parsing and
//! logging setup live here, everything else is delegated.

pub mod cli;
pub mod commands;
pub mod exit_codes;
pub mod logging;

pub use cli::{Cli, Commands};
pub use commands::run_cli;
pub use exit_codes::ExitCode;
pub use logging::{init_tracing, LogFormat};
