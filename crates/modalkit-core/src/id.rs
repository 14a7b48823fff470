#![forbid(unsafe_code)]

//! Modal identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a modal on the stack.
///
/// Callers may supply their own ids (any string); otherwise the store
/// generates a UUID v4. Uniqueness is only guaranteed among currently
/// active entries: an id is free for reuse once its modal has resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalId(String);

impl ModalId {
    /// Create an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ModalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
