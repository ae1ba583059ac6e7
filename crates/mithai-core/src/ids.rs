//! Newtype IDs for type-safe identifiers.
//!
//! The server mints every identifier; the client only carries them around.
//! Newtypes keep a sweet ID from being confused with a purchase ID.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(SweetId);
define_id!(PurchaseId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = SweetId::new("66b2f0");
        assert_eq!(id.as_str(), "66b2f0");
        assert_eq!(id.to_string(), "66b2f0");
        assert_eq!(SweetId::from("66b2f0"), id);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = PurchaseId::new("p1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""p1""#);
    }
}
