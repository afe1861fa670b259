//! Structured logging setup for the binary.
//!
//! Log level comes from `-v` when given, else from `RUST_LOG`, else `warn`.
//! Logs are written to stderr so results on stdout stay parseable.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    if verbose > 0 {
        return EnvFilter::new(level_for(verbose));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(0)))
}

/// Installs the global subscriber. Does nothing if one is already set.
pub fn init_tracing(verbose: u8, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    // Ignore error if already initialized
    installed.ok();
}
