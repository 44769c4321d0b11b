//! Identifier types for users, escape rooms, and stages.
//!
//! All identifiers are opaque strings. Ids minted by Roomkit itself are
//! UUID v4 strings, but ids supplied by the store or the authentication
//! layer are accepted verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from any string.
            pub fn new<S: Into<String>>(id: S) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts to the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
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

string_id! {
    /// Identity of the acting user, supplied by the authentication layer.
    ///
    /// Treated as trusted input; Roomkit only compares it for equality.
    UserId
}

string_id! {
    /// Unique identifier for an escape room.
    EscapeRoomId
}

string_id! {
    /// Unique identifier for a stage within an escape room.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomkit_core::StageId;
    ///
    /// let id = StageId::new("stage-1");
    /// assert_eq!(id.as_str(), "stage-1");
    /// ```
    StageId
}

impl EscapeRoomId {
    /// Mints a new random escape room id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl StageId {
    /// Mints a new random stage id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
