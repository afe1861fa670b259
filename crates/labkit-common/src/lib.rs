//! labkit common types and errors.
//!
//! This crate provides foundational types shared across the labkit crates:
//! - The unified error type and result alias
//! - The property lookup seam used by parameter expansion
//! - Enum-to-value mapping for closed constant sets
//! - Output formats for command results

pub mod enum_value;
pub mod error;
pub mod lookup;
pub mod output;

pub use enum_value::{enumerate_property, EnumValue};
pub use error::{Error, Result};
pub use lookup::PropertyLookup;
pub use output::OutputFormat;
