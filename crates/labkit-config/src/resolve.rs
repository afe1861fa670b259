//! Property file name resolution.
//!
//! A file name template is either static (`app`) or ends in one parameter
//! reference (`app-${profile:-dev}`). Only the trailing `$`-suffix is
//! expanded; everything before it is kept literally.

use std::sync::LazyLock;

use labkit_common::{PropertyLookup, Result};
use regex::Regex;
use tracing::debug;

use crate::expand::expand;

// Whitespace here is ASCII only: non-ASCII characters belong to the name.
static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ \t\n\x0B\x0C\r]+)(\$[^ \t\n\x0B\x0C\r]+)$").expect("regex")
});

/// Resolves a property file name template against `lookup`.
///
/// Templates with no trailing `$`-suffix come back unchanged. A suffix that
/// is not a well-formed parameter reference fails with
/// [`labkit_common::Error::MalformedParameter`].
pub fn resolve_file_name(template: &str, lookup: &impl PropertyLookup) -> Result<String> {
    let Some(caps) = TEMPLATE_RE.captures(template) else {
        debug!(template, "static property file name");
        return Ok(template.to_string());
    };

    let prefix = &caps[1];
    let resolved = format!("{prefix}{}", expand(&caps[2], lookup)?);
    debug!(template, resolved = %resolved, "resolved property file name");
    Ok(resolved)
}
