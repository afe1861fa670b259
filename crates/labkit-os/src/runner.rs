//! External command execution.
//!
//! [`run`] starts a program, waits for it and keeps only what most callers
//! need: the exit status and the first line the command printed.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;
use tracing::debug;

use labkit_common::{Error, Result};

/// Outcome of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    status: i32,
    response: Option<String>,
}

impl CommandOutput {
    /// Exit status. Zero usually means success.
    pub fn status(&self) -> i32 {
        self.status
    }

    /// First line the command printed, if any.
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandOutput{{status={}, response='{}'}}",
            self.status,
            self.response.as_deref().unwrap_or_default()
        )
    }
}

/// Runs a command and waits for it to finish.
///
/// The first item is the program, the rest are its arguments; the items are
/// copied before the child starts. The response is the first line of
/// standard output, or of standard error when standard output is empty.
///
/// A non-zero exit is reported through [`CommandOutput::status`], not as an
/// error. Failing to start the program is an [`Error::CommandSpawn`].
pub fn run<I, S>(command_with_args: I) -> Result<CommandOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut parts = command_with_args
        .into_iter()
        .map(|part| part.as_ref().to_os_string());
    let program = parts.next().ok_or(Error::EmptyCommand)?;
    let args: Vec<OsString> = parts.collect();
    let label = command_label(&program, &args);

    let output = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::CommandSpawn {
            command: label.clone(),
            source,
        })?;

    let status = exit_code(output.status);
    let response = first_line(&output.stdout).or_else(|| first_line(&output.stderr));
    debug!(command = %label, status, "command finished");

    Ok(CommandOutput { status, response })
}

fn command_label(program: &OsStr, args: &[OsString]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

fn first_line(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    String::from_utf8_lossy(bytes)
        .lines()
        .next()
        .map(|line| line.trim_end_matches('\r').to_string())
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
