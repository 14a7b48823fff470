#![forbid(unsafe_code)]

//! Keyboard-shortcut matching and dispatch for modalkit.
//!
//! This crate provides:
//! - [`KeyCombo`] for a key plus an exact modifier set, parseable from
//!   strings like `"Ctrl+Shift+K"`
//! - [`Shortcuts`] for dispatching [`KeyEvent`]s to registered callbacks

pub mod combo;
pub mod key;
pub mod shortcuts;

pub use combo::{KeyCombo, KeyParseError};
pub use key::{Key, KeyEvent, Modifiers};
pub use shortcuts::{ShortcutId, ShortcutOptions, Shortcuts};
