//! Runtime configuration context.
//!
//! A [`ConfigContext`] is the explicit stand-in for a process-wide property
//! table. It is built once (usually from the current process) and handed to
//! expansion and resolution, which only ever read it.

use std::collections::BTreeMap;

use labkit_common::PropertyLookup;
use tracing::trace;

use crate::expand;
use crate::Result;

/// Well-known context keys populated by [`ConfigContext::from_process`].
pub mod keys {
    pub const USER_NAME: &str = "user.name";
    pub const USER_HOME: &str = "user.home";
    pub const USER_DIR: &str = "user.dir";
    pub const OS_NAME: &str = "os.name";
    pub const OS_ARCH: &str = "os.arch";
    pub const FILE_SEPARATOR: &str = "file.separator";
    pub const PATH_SEPARATOR: &str = "path.separator";
}

/// String properties visible to expansion and file name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigContext {
    values: BTreeMap<String, String>,
}

impl ConfigContext {
    /// A context with no properties at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the current process.
    ///
    /// Environment variables come first; the well-known [`keys`] are set
    /// afterwards and replace any environment variable of the same name.
    /// Variables that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut ctx = Self::empty();
        for (key, value) in std::env::vars_os() {
            if let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) {
                ctx.values.insert(key, value);
            }
        }

        if let Some(name) = current_user_name() {
            ctx.set(keys::USER_NAME, name);
        }
        if let Some(home) = dirs::home_dir() {
            ctx.set(keys::USER_HOME, home.display().to_string());
        }
        if let Ok(cwd) = std::env::current_dir() {
            ctx.set(keys::USER_DIR, cwd.display().to_string());
        }
        ctx.set(keys::OS_NAME, std::env::consts::OS);
        ctx.set(keys::OS_ARCH, std::env::consts::ARCH);
        ctx.set(keys::FILE_SEPARATOR, std::path::MAIN_SEPARATOR.to_string());
        ctx.set(keys::PATH_SEPARATOR, if cfg!(windows) { ";" } else { ":" });

        trace!(count = ctx.values.len(), "captured process configuration context");
        ctx
    }

    /// Builder-style [`ConfigContext::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key`, returning the value it replaces.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Applies `key=value` definitions (as given by `-D` flags).
    ///
    /// A definition without `=` sets the key to the empty string. Keys are
    /// trimmed, values are kept as written.
    pub fn extend_from_definitions<I, S>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for definition in definitions {
            let definition = definition.as_ref();
            let (key, value) = definition.split_once('=').unwrap_or((definition, ""));
            self.set(key.trim(), value);
        }
    }

    /// Expands a parameter reference against this context.
    pub fn expand(&self, reference: &str) -> Result<String> {
        expand::expand(reference, self)
    }
}

/// Login name of the user running this process.
///
/// The account database is consulted first, so the name is known even when
/// the environment has been stripped (cron, containers). `USER` and then
/// `USERNAME` are the fallback.
fn current_user_name() -> Option<String> {
    account_name()
        .into_iter()
        .chain(std::env::var("USER").ok())
        .chain(std::env::var("USERNAME").ok())
        .find(|name| !name.is_empty())
}

#[cfg(unix)]
fn account_name() -> Option<String> {
    use std::ffi::CStr;

    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: every pointer refers to a live local, and `buf.len()` is the
        // true capacity of `buf`.
        let rc = unsafe {
            libc::getpwuid_r(
                libc::getuid(),
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut found,
            )
        };
        if rc == libc::ERANGE && buf.len() < 1 << 16 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || found.is_null() || entry.pw_name.is_null() {
            return None;
        }
        // SAFETY: on success `pw_name` points to a NUL-terminated string in `buf`.
        let name = unsafe { CStr::from_ptr(entry.pw_name) };
        return name.to_str().ok().map(str::to_string);
    }
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}

impl PropertyLookup for ConfigContext {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigContext {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut ctx = Self::empty();
        ctx.extend(iter);
        ctx
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ConfigContext {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
