//! Document identifiers.
//!
//! Every document in the backing store is addressed by an opaque string id.
//! Draft revisions live under the `drafts.` namespace and are excluded from
//! every query the adapter runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Id prefix marking an unpublished draft revision.
pub const DRAFT_PREFIX: &str = "drafts.";

/// Check whether an id addresses a draft revision.
pub fn is_draft(id: &str) -> bool {
    id.starts_with(DRAFT_PREFIX)
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse from a string, rejecting empty and whitespace-bearing ids.
            pub fn parse(s: impl Into<String>) -> crate::Result<Self> {
                let s = s.into();
                if s.is_empty() {
                    return Err(crate::Error::InvalidId(format!(
                        "{} must not be empty",
                        stringify!($name)
                    )));
                }
                if s.chars().any(char::is_whitespace) {
                    return Err(crate::Error::InvalidId(format!(
                        "{} must not contain whitespace: {s:?}",
                        stringify!($name)
                    )));
                }
                Ok(Self(s))
            }

            /// Get the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this id addresses a draft revision.
            pub fn is_draft(&self) -> bool {
                is_draft(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
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
    /// Unique identifier for a band.
    BandId
}

string_id! {
    /// Unique identifier for a band member (also used for requester identity).
    MemberId
}

string_id! {
    /// Unique identifier for a project.
    ProjectId
}

string_id! {
    /// Unique identifier for a recording document.
    RecordingId
}

string_id! {
    /// Unique identifier for a binary asset held by the backing store.
    AssetId
}
