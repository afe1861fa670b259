//! Enums that stand for an external value.
//!
//! Some enums are exchanged with the outside world as something other than
//! their own name: a lower-case string in a config file, a numeric status on
//! the wire. Implementing [`EnumValue`] attaches that value to each variant
//! and gives the reverse mapping for free.
//!
//! ```
//! use std::borrow::Cow;
//! use labkit_common::EnumValue;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Level {
//!     Low,
//!     High,
//! }
//!
//! impl EnumValue for Level {
//!     type Value = str;
//!     const VARIANTS: &'static [Self] = &[Level::Low, Level::High];
//!
//!     fn value(&self) -> &str {
//!         match self {
//!             Level::Low => "low",
//!             Level::High => "high",
//!         }
//!     }
//!
//!     fn sanitize(value: &str) -> Cow<'_, str> {
//!         Cow::Owned(value.to_lowercase())
//!     }
//! }
//!
//! assert_eq!(Level::from_value("high"), Some(Level::High));
//! assert_eq!(Level::from_value("HIGH"), None);
//! assert_eq!(Level::from_value_sanitized("HIGH"), Some(Level::High));
//! ```

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::lookup::PropertyLookup;

/// A closed set of enum constants, each holding an external value.
pub trait EnumValue: Copy + 'static {
    /// Type of the value each variant stands for.
    type Value: ?Sized + PartialEq + ToOwned;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The value this variant corresponds to.
    fn value(&self) -> &Self::Value;

    /// Canonical form of an incoming value.
    ///
    /// Only applied by [`EnumValue::from_value_sanitized`]. The default is the
    /// identity.
    fn sanitize(value: &Self::Value) -> Cow<'_, Self::Value> {
        Cow::Borrowed(value)
    }

    /// Variant to fall back on when a value matches nothing.
    fn default_variant() -> Option<Self> {
        None
    }

    /// First variant whose value equals `value` exactly.
    fn from_value(value: &Self::Value) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.value() == value)
    }

    /// Like [`EnumValue::from_value`], after passing `value` through
    /// [`EnumValue::sanitize`].
    fn from_value_sanitized(value: &Self::Value) -> Option<Self> {
        let sanitized = Self::sanitize(value);
        Self::from_value(&sanitized)
    }
}

/// Maps the property stored under `key` onto a variant of `E`.
///
/// The value is matched exactly. When the property is unset or matches no
/// variant, [`EnumValue::default_variant`] is used; without one the call
/// fails with [`Error::NoDefaultVariant`].
pub fn enumerate_property<E>(lookup: &impl PropertyLookup, key: &str) -> Result<E>
where
    E: EnumValue<Value = str>,
{
    let raw = lookup.lookup(key);
    raw.and_then(E::from_value)
        .or_else(E::default_variant)
        .ok_or_else(|| Error::NoDefaultVariant {
            type_name: std::any::type_name::<E>(),
            value: raw.map(str::to_string),
        })
}
