//! Type-safe identifiers for browser entities.
//!
//! Tab and window ids are assigned by the browser, unique for the lifetime of
//! the entity and never reused while the browser runs. Both are positive, so
//! they wrap [`NonZeroU64`]: a zero or negative id cannot be constructed.
//!
//! Being plain integers, ids are safe to interpolate into bridge scripts.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Macro
// ============================================================================

macro_rules! browser_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates an id, returning `None` for zero.
            #[inline]
            #[must_use]
            pub const fn new(value: u64) -> Option<Self> {
                match NonZeroU64::new(value) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// Returns the raw id value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: u64 = s
                    .parse()
                    .map_err(|_| format!("{} is not a valid {}", s, $label))?;
                Self::new(value).ok_or_else(|| format!("{} must be positive", $label))
            }
        }
    };
}

// ============================================================================
// Identifiers
// ============================================================================

browser_id!(
    /// Stable identity of a browser tab.
    TabId,
    "tab id"
);

browser_id!(
    /// Stable identity of a browser window.
    WindowId,
    "window id"
);

// ============================================================================
// Tests
// ============================================================================
