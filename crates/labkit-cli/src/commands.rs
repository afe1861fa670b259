//! Subcommand dispatch and rendering.

use std::io::Write;

use labkit_common::{Error, OutputFormat, Result};
use labkit_config::{resolve_file_name, ConfigContext, DirectorySource, PropertySource, SystemInfo};
use labkit_os::OsType;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::exit_codes::ExitCode;

/// Runs the parsed command line, writing results to `out`.
///
/// Returns the process exit status. Errors are rendered (to `out` as JSON,
/// or to stderr as text) rather than returned.
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> i32 {
    let mut ctx = ConfigContext::from_process();
    ctx.extend_from_definitions(&cli.defines);

    match dispatch(cli, &ctx, out) {
        Ok(code) => code,
        Err(err) => {
            let code = ExitCode::from(&err);
            report_error(&err, cli.format, out);
            code.as_i32()
        }
    }
}

fn report_error(err: &Error, format: OutputFormat, out: &mut dyn Write) {
    if format.is_json() {
        let doc = json!({ "error": { "code": err.code(), "message": err.to_string() } });
        if writeln!(out, "{doc}").is_ok() {
            return;
        }
    }
    eprintln!("labkit: {err}");
}

fn dispatch(cli: &Cli, ctx: &ConfigContext, out: &mut dyn Write) -> Result<i32> {
    debug!(command = ?cli.command, "dispatching");
    let format = cli.format;
    match &cli.command {
        Commands::Expand { reference } => {
            let value = ctx.expand(reference)?;
            render(out, format, &value, &json!({ "reference": reference, "value": value }))?;
            Ok(ExitCode::Ok.as_i32())
        }
        Commands::Resolve { template } => {
            let resolved = resolve_file_name(template, ctx)?;
            render(
                out,
                format,
                &resolved,
                &json!({ "template": template, "resolved": resolved }),
            )?;
            Ok(ExitCode::Ok.as_i32())
        }
        Commands::Props { template, keys } => show_properties(cli, ctx, template, keys, out),
        Commands::Run { command } => {
            let output = labkit_os::run(command)?;
            if format.is_json() {
                writeln!(out, "{}", serde_json::to_string(&output)?)?;
            } else if let Some(line) = output.response() {
                writeln!(out, "{line}")?;
            }
            Ok(output.status())
        }
        Commands::Sysinfo => {
            let snapshot = SystemInfo::new(ctx).snapshot();
            if format.is_json() {
                writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
            } else {
                let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
                writeln!(out, "user.name: {}", text(&snapshot.user_name))?;
                writeln!(out, "user.home: {}", text(&snapshot.user_home))?;
                writeln!(out, "user.dir: {}", text(&snapshot.pwd))?;
                writeln!(out, "pid: {}", snapshot.pid)?;
                writeln!(out, "hostname: {}", text(&snapshot.hostname))?;
                writeln!(out, "os.name: {}", text(&snapshot.os_name))?;
                writeln!(out, "os.arch: {}", text(&snapshot.os_arch))?;
            }
            Ok(ExitCode::Ok.as_i32())
        }
        Commands::Os => {
            let os = OsType::current();
            render(out, format, os.as_str(), &json!({ "os_type": os }))?;
            Ok(ExitCode::Ok.as_i32())
        }
    }
}

#[derive(Serialize)]
struct PropertyEntry<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

fn show_properties(
    cli: &Cli,
    ctx: &ConfigContext,
    template: &str,
    keys: &[String],
    out: &mut dyn Write,
) -> Result<i32> {
    let resolved = resolve_file_name(template, ctx)?;
    let source = DirectorySource::from_context(&cli.config_dirs, ctx);
    let file = source.load(&resolved)?;

    let entries: Vec<PropertyEntry<'_>> = if keys.is_empty() {
        file.iter()
            .map(|(key, value)| PropertyEntry {
                key,
                value: Some(value),
            })
            .collect()
    } else {
        keys.iter()
            .map(|key| {
                let value = file.get(key);
                if value.is_none() {
                    warn!(key = key.as_str(), "no property found for key {key}");
                }
                PropertyEntry { key, value }
            })
            .collect()
    };

    if cli.format.is_json() {
        let doc = json!({ "file": file.name(), "properties": entries });
        writeln!(out, "{doc}")?;
    } else {
        for entry in entries.iter().filter(|e| e.value.is_some()) {
            writeln!(out, "{}={}", entry.key, entry.value.unwrap_or_default())?;
        }
    }

    let all_found = entries.iter().all(|e| e.value.is_some());
    Ok(if all_found {
        ExitCode::Ok.as_i32()
    } else {
        ExitCode::Failed.as_i32()
    })
}

fn render(
    out: &mut dyn Write,
    format: OutputFormat,
    text: &str,
    doc: &serde_json::Value,
) -> Result<()> {
    if format.is_json() {
        writeln!(out, "{doc}")?;
    } else {
        writeln!(out, "{text}")?;
    }
    Ok(())
}
