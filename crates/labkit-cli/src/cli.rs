//! Command line definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use labkit_common::OutputFormat;

use crate::logging::LogFormat;

/// Parameter expansion, typed property files and OS helpers.
#[derive(Parser, Debug)]
#[command(name = "labkit", version, about)]
pub struct Cli {
    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log line format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Set a configuration property, overriding the environment
    #[arg(short = 'D', long = "define", global = true, value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Directory to search for property files (repeatable)
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    pub config_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand a `${name-default}` or `${name:-default}` reference
    Expand {
        /// Parameter reference to expand
        reference: String,
    },

    /// Resolve a property file name template
    Resolve {
        /// File name template, e.g. `app-${profile:-dev}`
        template: String,
    },

    /// Show the properties of a resolved property file
    Props {
        /// File name template, e.g. `app-${profile:-dev}`
        template: String,

        /// Only show these keys
        keys: Vec<String>,
    },

    /// Run an external command and print its first output line
    Run {
        /// Program followed by its arguments
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },

    /// Show user, process and host information
    Sysinfo,

    /// Show the detected operating system type
    Os,
}
