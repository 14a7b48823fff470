#![forbid(unsafe_code)]

//! Error types for modal store operations.
//!
//! Most store operations cannot fail: resolving or popping an unknown id is
//! a silent no-op. Errors are reserved for caller mistakes that would
//! otherwise corrupt the stack or lose data.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate id | `push` with an explicit id already active | `Err(DuplicateId)`, stack untouched |
//! | Bad payload | Raw resolution payload is not `{trigger, ...}` | `Err(InvalidPayload)`, entry stays active |

use crate::id::ModalId;

/// Errors from modal store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// An entry with this id is already on the stack.
    DuplicateId(ModalId),
    /// A raw resolution payload could not be decoded.
    InvalidPayload(String),
}

impl std::fmt::Display for ModalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "modal id '{id}' is already active"),
            Self::InvalidPayload(msg) => write!(f, "invalid resolution payload: {msg}"),
        }
    }
}

impl std::error::Error for ModalError {}

impl From<serde_json::Error> for ModalError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
