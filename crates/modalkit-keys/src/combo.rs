#![forbid(unsafe_code)]

//! Key combinations and their string form.
//!
//! The format is `[modifier+]*key`, case-insensitive, e.g. `"Ctrl+Shift+K"`,
//! `"Escape"`, `"Cmd+S"`.
//!
//! | Modifier | Aliases |
//! |----------|---------|
//! | `Ctrl` | `control` |
//! | `Alt` | `option`, `opt` |
//! | `Shift` | |
//! | `Meta` | `cmd`, `command`, `super`, `win` |
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty input | `""` or a trailing `+` | `Err(Empty)` |
//! | Unknown key | Last segment isn't a key name | `Err(UnknownKey)` |
//! | Unknown modifier | Earlier segment isn't a modifier | `Err(UnknownModifier)` |
//! | Repeated modifier | `"Ctrl+Ctrl+K"` | `Err(DuplicateModifier)` |

use std::fmt;
use std::str::FromStr;

use crate::key::{Key, KeyEvent, Modifiers};

/// Errors from parsing a [`KeyCombo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Empty,
    UnknownKey(String),
    UnknownModifier(String),
    DuplicateModifier(String),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty key combination"),
            Self::UnknownKey(k) => write!(f, "unknown key: {k}"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier: {m}"),
            Self::DuplicateModifier(m) => write!(f, "modifier '{m}' given twice"),
        }
    }
}

impl std::error::Error for KeyParseError {}

/// A key plus the exact modifier set that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key: key.normalized(),
            modifiers,
        }
    }

    /// A combo with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    /// Plain Escape.
    pub const ESCAPE: Self = Self {
        key: Key::Escape,
        modifiers: Modifiers::empty(),
    };

    /// Whether `event` is exactly this combination.
    ///
    /// Extra held modifiers prevent a match: `Ctrl+S` does not fire on
    /// `Ctrl+Shift+S`. Character keys compare case-insensitively, so an
    /// event reporting `Char('S')` with Shift held matches `Shift+S`.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key.normalized() == event.key.normalized() && self.modifiers == event.modifiers
    }
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "alt" | "option" | "opt" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "meta" | "cmd" | "command" | "super" | "win" => Some(Modifiers::META),
        _ => None,
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        // A lone "+" is the plus key, and so is a trailing "++".
        if s == "+" {
            return Ok(Self::key(Key::Char('+')));
        }
        let (prefix, key_name) = match s.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key_name)) => (Some(prefix), key_name.trim()),
                None => (None, s),
            },
        };
        if key_name.is_empty() {
            return Err(KeyParseError::Empty);
        }
        let key = Key::from_name(key_name)
            .ok_or_else(|| KeyParseError::UnknownKey(key_name.to_owned()))?;

        let mut modifiers = Modifiers::empty();
        for part in prefix.into_iter().flat_map(|p| p.split('+')).map(str::trim) {
            let m = parse_modifier(part)
                .ok_or_else(|| KeyParseError::UnknownModifier(part.to_owned()))?;
            if modifiers.contains(m) {
                return Err(KeyParseError::DuplicateModifier(part.to_owned()));
            }
            modifiers |= m;
        }

        Ok(Self { key, modifiers })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in Modifiers::ORDERED {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}
