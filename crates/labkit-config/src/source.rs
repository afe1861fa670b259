//! Property file sources and search path resolution.
//!
//! Search path resolution order:
//! 1. Directories given on the command line
//! 2. `LABKIT_CONFIG_PATH` in the configuration context
//! 3. Defaults: the working directory (`user.dir`), then `<config dir>/labkit`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use labkit_common::{Error, Result};
use tracing::{debug, trace};

use crate::context::{keys, ConfigContext};
use crate::properties::PropertyFile;
use crate::PROPERTY_FILE_EXTENSION;

/// Context key holding an OS-style list of property directories.
pub const CONFIG_PATH_VAR: &str = "LABKIT_CONFIG_PATH";

/// Subdirectory of the user config directory searched by default.
const APP_DIR_NAME: &str = "labkit";

/// Something that can produce a property file given its resolved name.
pub trait PropertySource {
    /// Loads the property file called `name`.
    ///
    /// Fails with [`Error::PropertyFileNotFound`] when no file exists under
    /// that name.
    fn load(&self, name: &str) -> Result<PropertyFile>;
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn load(&self, name: &str) -> Result<PropertyFile> {
        (**self).load(name)
    }
}

// ── Directory source ────────────────────────────────────────────────────

/// Looks for `<name>.<extension>` in an ordered list of directories.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    search_path: Vec<PathBuf>,
    extension: String,
}

impl DirectorySource {
    /// Source over `search_path`, looking for `.properties` files.
    pub fn new<I, P>(search_path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_path: search_path.into_iter().map(Into::into).collect(),
            extension: PROPERTY_FILE_EXTENSION.to_string(),
        }
    }

    /// Source over the resolved search path for `ctx`.
    pub fn from_context(cli_dirs: &[PathBuf], ctx: &ConfigContext) -> Self {
        Self::new(resolve_search_path(cli_dirs, ctx))
    }

    /// Use a different file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// First existing candidate file for `name`, if any.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let file_name = format!("{name}.{}", self.extension);
        self.search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .inspect(|candidate| trace!(path = %candidate.display(), "checking property file"))
            .find(|candidate| candidate.is_file())
    }
}

impl PropertySource for DirectorySource {
    fn load(&self, name: &str) -> Result<PropertyFile> {
        let path = self
            .locate(name)
            .ok_or_else(|| Error::PropertyFileNotFound {
                name: name.to_string(),
                searched: self.search_path.clone(),
            })?;
        debug!(name, path = %path.display(), "loading property file");
        let text = std::fs::read_to_string(&path)?;
        PropertyFile::parse(name, &text)
    }
}

// ── In-memory source ────────────────────────────────────────────────────

/// Property files held in memory, keyed by resolved name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the text of the file called `name`.
    pub fn with_file(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(name.into(), text.into());
        self
    }
}

impl PropertySource for MemorySource {
    fn load(&self, name: &str) -> Result<PropertyFile> {
        let text = self
            .files
            .get(name)
            .ok_or_else(|| Error::PropertyFileNotFound {
                name: name.to_string(),
                searched: Vec::new(),
            })?;
        PropertyFile::parse(name, text)
    }
}

// ── Search path ─────────────────────────────────────────────────────────

/// Resolves the directories searched for property files.
///
/// Non-empty `cli_dirs` win outright. Otherwise a non-blank
/// [`CONFIG_PATH_VAR`] in `ctx` is split with the platform path separator.
/// Otherwise the defaults apply.
pub fn resolve_search_path(cli_dirs: &[PathBuf], ctx: &ConfigContext) -> Vec<PathBuf> {
    if !cli_dirs.is_empty() {
        debug!(dirs = cli_dirs.len(), "using property directories from command line");
        return cli_dirs.to_vec();
    }

    if let Some(raw) = ctx.get(CONFIG_PATH_VAR).filter(|v| !v.trim().is_empty()) {
        let from_env: Vec<PathBuf> = std::env::split_paths(raw)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        debug!(
            var = CONFIG_PATH_VAR,
            dirs = from_env.len(),
            "using property directories from environment"
        );
        return from_env;
    }

    default_search_path(ctx)
}

fn default_search_path(ctx: &ConfigContext) -> Vec<PathBuf> {
    let mut search = vec![ctx
        .get(keys::USER_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(".").to_path_buf())];
    if let Some(config_dir) = dirs::config_dir() {
        search.push(config_dir.join(APP_DIR_NAME));
    }
    search
}
