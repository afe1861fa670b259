//! Typed, enum-keyed access to a property file.
//!
//! A property file named `foobar` holding
//!
//! ```text
//! FOO=foo
//! BAR=bar
//! ```
//!
//! is read through an enum whose variant names are the file's keys:
//!
//! ```
//! use labkit_config::{property_keys, ConfigContext, MemorySource, TypedPropertyStore};
//!
//! property_keys! {
//!     pub enum FooBar {
//!         FOO,
//!         BAR,
//!     }
//! }
//!
//! let source = MemorySource::new().with_file("foobar", "FOO=foo\nBAR=bar\n");
//! let store = TypedPropertyStore::<FooBar>::load("foobar", &ConfigContext::empty(), &source)?;
//! assert_eq!(store.get(FooBar::FOO), Some("foo"));
//! # Ok::<(), labkit_common::Error>(())
//! ```
//!
//! The file name may end in a parameter reference, e.g. `foobar-${profile:-dev}`,
//! so the loaded file follows the active profile.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::context::ConfigContext;
use crate::properties::PropertyFile;
use crate::resolve::resolve_file_name;
use crate::source::PropertySource;
use crate::Result;

/// A closed set of property keys.
///
/// Each key's [`PropertyKey::name`] is looked up verbatim (case-sensitive)
/// in the property file. Use [`property_keys!`](crate::property_keys) to
/// declare one.
pub trait PropertyKey: Copy + Eq + Hash + std::fmt::Debug + 'static {
    /// Every key, in declaration order.
    const ALL: &'static [Self];

    /// Textual name of the key in the property file.
    fn name(&self) -> &'static str;
}

/// Declares an enum implementing [`PropertyKey`].
///
/// Variant identifiers double as property names, so they are usually
/// written the way the file spells them.
#[macro_export]
macro_rules! property_keys {
    ($(#[$attr:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$attr])*
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::PropertyKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

/// Property values read once from a file and addressed by enum key.
///
/// Keys missing from the file are recorded as absent; reading them is not an
/// error. The store never changes after construction.
#[derive(Debug, Clone)]
pub struct TypedPropertyStore<K: PropertyKey> {
    resolved_name: String,
    values: HashMap<K, String>,
    missing: Vec<K>,
}

impl<K: PropertyKey> TypedPropertyStore<K> {
    /// Resolves `template` against `ctx`, loads the file from `source` and
    /// reads every key of `K`.
    ///
    /// Fails when the template's parameter reference is malformed or when
    /// `source` has no file under the resolved name.
    pub fn load(template: &str, ctx: &ConfigContext, source: &impl PropertySource) -> Result<Self> {
        let resolved = resolve_file_name(template, ctx)?;
        let file = source.load(&resolved)?;
        Ok(Self::from_properties(&file))
    }

    /// Reads every key of `K` from an already loaded file.
    pub fn from_properties(file: &PropertyFile) -> Self {
        let mut values = HashMap::with_capacity(K::ALL.len());
        let mut missing = Vec::new();

        for &key in K::ALL {
            match file.get(key.name()) {
                Some(value) => {
                    values.insert(key, value.to_string());
                }
                None => {
                    warn!(key = key.name(), "no property found for key {}", key.name());
                    missing.push(key);
                }
            }
        }

        debug!(
            file = file.name(),
            found = values.len(),
            missing = missing.len(),
            "typed properties loaded"
        );

        Self {
            resolved_name: file.name().to_string(),
            values,
            missing,
        }
    }

    /// The value of `key`, or `None` when the file did not define it.
    pub fn get(&self, key: K) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// The value of `key`, or `fallback` when the file did not define it.
    pub fn get_or_default<'a>(&'a self, key: K, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    /// Name of the property file the values came from.
    pub fn resolved_name(&self) -> &str {
        &self.resolved_name
    }

    /// Keys the file did not define, in declaration order.
    pub fn missing_keys(&self) -> &[K] {
        &self.missing
    }

    /// Every key with its value, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Option<&str>)> + '_ {
        K::ALL.iter().map(move |&key| (key, self.get(key)))
    }
}
