//! Key-value lookup seam.
//!
//! Parameter expansion and file name resolution never read process-wide
//! state directly; they are handed something implementing [`PropertyLookup`].

use std::collections::{BTreeMap, HashMap};

/// A read-only source of string properties keyed by name.
pub trait PropertyLookup {
    /// Returns the value stored under `key`, or `None` when the key is unset.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl PropertyLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl PropertyLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: PropertyLookup + ?Sized> PropertyLookup for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}
