//! labkit configuration loading and typed property access.
//!
//! This crate provides:
//! - An explicit runtime configuration context (system properties + environment)
//! - Bash-style parameter expansion (`${name-default}`, `${name:-default}`)
//! - Profile-aware property file name resolution
//! - `.properties` parsing and property file sources with search path resolution
//! - Typed, enum-keyed property stores
//! - System information drawn from the context

pub mod context;
pub mod expand;
pub mod properties;
pub mod resolve;
pub mod source;
pub mod store;
pub mod system_info;

pub use context::ConfigContext;
pub use expand::{expand, ParameterReference};
pub use properties::PropertyFile;
pub use resolve::resolve_file_name;
pub use source::{
    resolve_search_path, DirectorySource, MemorySource, PropertySource, CONFIG_PATH_VAR,
};
pub use store::{PropertyKey, TypedPropertyStore};
pub use system_info::{SystemInfo, SystemSnapshot};

pub use labkit_common::{Error, PropertyLookup, Result};

/// File extension of property files located by [`DirectorySource`].
pub const PROPERTY_FILE_EXTENSION: &str = "properties";
