//! Opaque identifiers handed out by the catalog.
//!
//! The catalog speaks in string IDs. They are compared as strings and never
//! parsed as numbers, so `"042"` and `"42"` are different identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a remote catalog entity (scene, movie, gallery or image).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    /// Wrap a raw identifier.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CatalogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
