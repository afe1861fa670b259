//! `.properties` file parsing.
//!
//! Supported syntax:
//! - `key=value`, `key: value` and `key value` entries
//! - `#` and `!` comment lines, blank lines
//! - line continuation with a trailing backslash
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes in keys and values
//!
//! A key that appears twice keeps its first position and its last value.

use std::collections::HashMap;

use labkit_common::{Error, PropertyLookup, Result};

/// A parsed property file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFile {
    name: String,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PropertyFile {
    /// Parses `text`. `name` is used in error messages and kept for display.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut file = PropertyFile {
            name: name.into(),
            ..Default::default()
        };

        for (line_no, line) in logical_lines(text) {
            let (raw_key, raw_value) = split_entry(&line);
            let key = unescape(raw_key).map_err(|reason| file.invalid(line_no, reason))?;
            let value = unescape(raw_value).map_err(|reason| file.invalid(line_no, reason))?;
            file.insert(key, value);
        }

        Ok(file)
    }

    /// Name the file was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    fn invalid(&self, line: usize, reason: String) -> Error {
        Error::InvalidPropertyFile {
            name: self.name.clone(),
            line,
            reason,
        }
    }
}

impl PropertyLookup for PropertyFile {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

// ── Lexing ──────────────────────────────────────────────────────────────

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Joins continued lines and drops comments and blank lines.
///
/// Each logical line is paired with the 1-based number of the natural line
/// it starts on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, natural) in normalized.split('\n').enumerate() {
        let stripped = natural.trim_start_matches(is_blank);

        let (start, mut buffer) = match pending.take() {
            Some(continued) => continued,
            None => {
                if stripped.is_empty() || stripped.starts_with(['#', '!']) {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = stripped.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buffer.push_str(&stripped[..stripped.len() - 1]);
            pending = Some((start, buffer));
        } else {
            buffer.push_str(stripped);
            lines.push((start, buffer));
        }
    }

    if let Some(unfinished) = pending {
        lines.push(unfinished);
    }
    lines
}

/// Splits a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut chars = line.char_indices();
    let mut key_end = line.len();
    while let Some((pos, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if c == '=' || c == ':' || is_blank(c) {
            key_end = pos;
            break;
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix(['=', ':'])
        .unwrap_or(rest)
        .trim_start_matches(is_blank);
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars)?;
                let mut units = vec![unit];
                if (0xD800..0xDC00).contains(&unit) {
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(format!("unpaired surrogate \\u{unit:04X}"));
                    }
                    units.push(read_code_unit(&mut chars)?);
                }
                for decoded in char::decode_utf16(units) {
                    let decoded =
                        decoded.map_err(|e| format!("invalid unicode escape: {e}"))?;
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_code_unit(chars: &mut impl Iterator<Item = char>) -> std::result::Result<u16, String> {
    let digits: String = chars.take(4).collect();
    if digits.chars().count() != 4 {
        return Err(format!("truncated \\u escape {digits:?}"));
    }
    // from_str_radix alone would accept a sign
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\u escape {digits:?}"));
    }
    u16::from_str_radix(&digits, 16).map_err(|_| format!("malformed \\u escape {digits:?}"))
}
