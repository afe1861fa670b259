//! Bash-style parameter expansion.
//!
//! Two reference shapes are understood:
//!
//! - `${name-default}` yields the value of `name`, or `default` when `name`
//!   is unset. A value that is set but empty is returned as is.
//! - `${name:-default}` yields the value of `name`, or `default` when `name`
//!   is unset, empty, or only whitespace.
//!
//! Names are ASCII word characters and dots (`test.profile`, `APP_ENV`).
//! The default is any non-empty text without tabs or line breaks (`\t`,
//! `\n`, `\x0B`, `\x0C`, `\r`); plain spaces and non-ASCII characters such
//! as U+00A0 are allowed. It is substituted exactly as written, never
//! trimmed.

use std::sync::LazyLock;

use labkit_common::{Error, PropertyLookup, Result};
use regex::Regex;

static UNSET_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$\{(?P<name>[A-Za-z0-9_.]+)-(?P<default>[^\t\n\x0B\x0C\r]+)\}$").expect("regex")
});

static BLANK_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$\{(?P<name>[A-Za-z0-9_.]+):-(?P<default>[^\t\n\x0B\x0C\r]+)\}$").expect("regex")
});

/// A parsed parameter reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterReference {
    /// `${name-default}`: default used only when `name` is unset.
    UnsetDefault { name: String, default: String },
    /// `${name:-default}`: default used when `name` is unset or blank.
    BlankDefault { name: String, default: String },
}

impl ParameterReference {
    /// Parses `input` as one of the two reference shapes.
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(caps) = UNSET_DEFAULT_RE.captures(input) {
            return Ok(ParameterReference::UnsetDefault {
                name: caps["name"].to_string(),
                default: caps["default"].to_string(),
            });
        }
        if let Some(caps) = BLANK_DEFAULT_RE.captures(input) {
            return Ok(ParameterReference::BlankDefault {
                name: caps["name"].to_string(),
                default: caps["default"].to_string(),
            });
        }
        Err(Error::MalformedParameter {
            input: input.to_string(),
        })
    }

    /// The referenced parameter name.
    pub fn name(&self) -> &str {
        match self {
            ParameterReference::UnsetDefault { name, .. }
            | ParameterReference::BlankDefault { name, .. } => name,
        }
    }

    /// The default value as written in the reference.
    pub fn default_value(&self) -> &str {
        match self {
            ParameterReference::UnsetDefault { default, .. }
            | ParameterReference::BlankDefault { default, .. } => default,
        }
    }

    /// Resolves this reference against `lookup`.
    pub fn expand(&self, lookup: &impl PropertyLookup) -> String {
        let value = match self {
            ParameterReference::UnsetDefault { name, default } => {
                lookup.lookup(name).unwrap_or(default.as_str())
            }
            ParameterReference::BlankDefault { name, default } => match lookup.lookup(name) {
                Some(value) if !value.trim().is_empty() => value,
                _ => default.as_str(),
            },
        };
        value.to_string()
    }
}

impl std::fmt::Display for ParameterReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterReference::UnsetDefault { name, default } => write!(f, "${{{name}-{default}}}"),
            ParameterReference::BlankDefault { name, default } => {
                write!(f, "${{{name}:-{default}}}")
            }
        }
    }
}

/// Expands a single parameter reference against `lookup`.
///
/// Fails with [`Error::MalformedParameter`] when `reference` is neither
/// `${name-default}` nor `${name:-default}`.
pub fn expand(reference: &str, lookup: &impl PropertyLookup) -> Result<String> {
    ParameterReference::parse(reference).map(|parsed| parsed.expand(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigContext;

    fn ctx(pairs: &[(&str, &str)]) -> ConfigContext {
        pairs.iter().copied().collect()
    }

    // ── Parsing ────────────────────────────────────────────────────

    #[test]
    fn test_parse_unset_default_form() {
        let parsed = ParameterReference::parse("${test.profile-dev}").unwrap();
        assert_eq!(
            parsed,
            ParameterReference::UnsetDefault {
                name: "test.profile".to_string(),
                default: "dev".to_string(),
            }
        );
        assert_eq!(parsed.name(), "test.profile");
        assert_eq!(parsed.default_value(), "dev");
    }

    #[test]
    fn test_parse_blank_default_form() {
        let parsed = ParameterReference::parse("${APP_ENV:-local build}").unwrap();
        assert!(matches!(parsed, ParameterReference::BlankDefault { .. }));
        assert_eq!(parsed.name(), "APP_ENV");
        assert_eq!(parsed.default_value(), "local build");
    }

    #[test]
    fn test_default_may_contain_dashes_and_colons() {
        let parsed = ParameterReference::parse("${a-:-b}").unwrap();
        assert_eq!(parsed.default_value(), ":-b");
        assert!(matches!(parsed, ParameterReference::UnsetDefault { .. }));
    }

    #[test]
    fn test_default_is_not_trimmed() {
        let empty = ConfigContext::empty();
        assert_eq!(expand("${a-  padded }", &empty).unwrap(), "  padded ");
        assert_eq!(expand("${a:- padded}", &empty).unwrap(), " padded");
    }

    #[test]
    fn test_malformed_references() {
        for input in [
            "",
            "profile",
            "$profile",
            "${profile}",
            "${profile-}",
            "${profile:-}",
            "${-dev}",
            "${pro file-dev}",
            "{profile-dev}",
            "${profile-dev",
            "x${profile-dev}",
            "${profile-dev}x",
            "${profile-a\tb}",
            "${profile-dev}\n",
            "${profile:-dev}\r\n",
        ] {
            match ParameterReference::parse(input) {
                Err(Error::MalformedParameter { input: carried }) => assert_eq!(carried, input),
                other => panic!("{input:?} should be malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_default_may_contain_non_ascii_characters() {
        let empty = ConfigContext::empty();
        assert_eq!(expand("${a-x\u{A0}y}", &empty).unwrap(), "x\u{A0}y");
        assert_eq!(expand("${a:-caf\u{e9}}", &empty).unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_default_rejects_ascii_control_whitespace() {
        for input in ["${a-x\ny}", "${a-x\ry}", "${a:-x\u{b}y}", "${a:-x\u{c}y}"] {
            assert!(
                matches!(ParameterReference::parse(input), Err(Error::MalformedParameter { .. })),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_display_round_trips_source_text() {
        for input in ["${a.b-c}", "${A_B:-c d}"] {
            let parsed = ParameterReference::parse(input).unwrap();
            assert_eq!(parsed.to_string(), input);
        }
    }

    // ── Expansion ──────────────────────────────────────────────────

    #[test]
    fn test_unset_default_uses_value_when_set() {
        let ctx = ctx(&[("profile", "prod")]);
        assert_eq!(expand("${profile-dev}", &ctx).unwrap(), "prod");
    }

    #[test]
    fn test_unset_default_keeps_empty_value() {
        let ctx = ctx(&[("profile", "")]);
        assert_eq!(expand("${profile-dev}", &ctx).unwrap(), "");
    }

    #[test]
    fn test_unset_default_keeps_blank_value() {
        let ctx = ctx(&[("profile", "   ")]);
        assert_eq!(expand("${profile-dev}", &ctx).unwrap(), "   ");
    }

    #[test]
    fn test_unset_default_falls_back_when_unset() {
        assert_eq!(
            expand("${profile-dev}", &ConfigContext::empty()).unwrap(),
            "dev"
        );
    }

    #[test]
    fn test_blank_default_falls_back_when_empty_or_blank() {
        for value in ["", " ", "\t \n"] {
            let ctx = ctx(&[("profile", value)]);
            assert_eq!(expand("${profile:-dev}", &ctx).unwrap(), "dev");
        }
        assert_eq!(
            expand("${profile:-dev}", &ConfigContext::empty()).unwrap(),
            "dev"
        );
    }

    #[test]
    fn test_blank_default_returns_value_untrimmed() {
        let ctx = ctx(&[("profile", " prod ")]);
        assert_eq!(expand("${profile:-dev}", &ctx).unwrap(), " prod ");
    }
}
