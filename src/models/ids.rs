//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. Ids are opaque strings: the store generates
//! them, but callers (and imported data) may use any string.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by the store when generating ids of this type
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(TransactionId, "transaction");
define_id!(CategoryId, "category");
define_id!(PaymentMethodId, "payment-method");

/// Generates ids of the form `{prefix}-{counter}-{millis}`
///
/// The millisecond component is strictly increasing for the lifetime of the
/// generator, so ids stay unique even after `reset` rewinds the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    counter: u64,
    last_millis: i64,
}

impl IdGenerator {
    /// Create a fresh generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id string for the given prefix
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        let millis = Utc::now().timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;
        format!("{}-{}-{}", prefix, self.counter, millis)
    }

    /// Rewind the counter (the timestamp floor is kept)
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Number of ids issued since creation or the last reset
    pub fn counter(&self) -> u64 {
        self.counter
    }
}
