#![forbid(unsafe_code)]

//! Keys, modifier sets, and key events.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const ALT = 0b0001;
        const CTRL = 0b0010;
        const META = 0b0100;
        const SHIFT = 0b1000;
    }
}

impl Modifiers {
    /// Canonical display order.
    pub(crate) const ORDERED: [(Self, &'static str); 4] = [
        (Self::CTRL, "Ctrl"),
        (Self::ALT, "Alt"),
        (Self::SHIFT, "Shift"),
        (Self::META, "Meta"),
    ];
}

/// A key, independent of modifiers.
///
/// Character keys are stored lowercased so `'K'` and `'k'` are the same
/// key; whether Shift was held lives in [`Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1`..=`F24`.
    F(u8),
}

impl Key {
    /// A character key, normalized to lowercase.
    #[must_use]
    pub fn char(c: char) -> Self {
        if c == ' ' {
            return Self::Space;
        }
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => Self::Char(l),
            _ => Self::Char(c),
        }
    }

    /// The same key with character case folded, as [`Key::char`] builds it.
    ///
    /// `Char` is a public variant, so hosts can construct `Char('S')`
    /// directly; matching compares normalized keys.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Char(c) => Self::char(c),
            other => other,
        }
    }

    /// Look up a key by name (`"Escape"`, `"esc"`, `"F5"`, `"k"`), case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::char(c));
        }

        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "escape" | "esc" => Self::Escape,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "space" => Self::Space,
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "up" | "arrowup" => Self::Up,
            "down" | "arrowdown" => Self::Down,
            "left" | "arrowleft" => Self::Left,
            "right" | "arrowright" => Self::Right,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "plus" => Self::Char('+'),
            other => {
                let digits = other.strip_prefix('f')?;
                if digits.is_empty()
                    || digits.starts_with('0')
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                {
                    return None;
                }
                let n: u8 = digits.parse().ok()?;
                if !(1..=24).contains(&n) {
                    return None;
                }
                Self::F(n)
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // "+" is the combo separator.
            Self::Char('+') => f.write_str("Plus"),
            // Uppercase only when that maps back to the same key ('ſ' would not).
            Self::Char(c) => {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) if Self::char(u) == *self => write!(f, "{u}"),
                    _ => write!(f, "{c}"),
                }
            }
            Self::Escape => f.write_str("Escape"),
            Self::Enter => f.write_str("Enter"),
            Self::Tab => f.write_str("Tab"),
            Self::Space => f.write_str("Space"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::PageUp => f.write_str("PageUp"),
            Self::PageDown => f.write_str("PageDown"),
            Self::F(n) => write!(f, "F{n}"),
        }
    }
}

/// A key press as delivered by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Auto-repeat from a held key.
    pub repeat: bool,
}

impl KeyEvent {
    /// A non-repeat press with no modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            repeat: false,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark as auto-repeat.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_are_case_insensitive() {
        assert_eq!(Key::char('K'), Key::char('k'));
        assert_eq!(Key::char('k'), Key::Char('k'));
        assert_eq!(Key::char(' '), Key::Space);
    }

    #[test]
    fn named_keys() {
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_name("PageDown"), Some(Key::PageDown));
        assert_eq!(Key::from_name("F5"), Some(Key::F(5)));
        assert_eq!(Key::from_name("f12"), Some(Key::F(12)));
        assert_eq!(Key::from_name("s"), Some(Key::Char('s')));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Key::from_name("F0"), None);
        assert_eq!(Key::from_name("F25"), None);
        assert_eq!(Key::from_name("hyper"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn function_key_names_are_plain_digits() {
        assert_eq!(Key::from_name("f+5"), None);
        assert_eq!(Key::from_name("F05"), None);
        assert_eq!(Key::from_name("F-1"), None);
        assert_eq!(Key::from_name("F"), None);
        assert_eq!(Key::from_name("F24"), Some(Key::F(24)));
    }

    #[test]
    fn normalized_folds_case() {
        assert_eq!(Key::Char('S').normalized(), Key::Char('s'));
        assert_eq!(Key::Char(' ').normalized(), Key::Space);
        assert_eq!(Key::Escape.normalized(), Key::Escape);
    }

    #[test]
    fn display_round_trips_through_from_name() {
        let keys = [
            Key::Escape,
            Key::Char('q'),
            Key::Char('+'),
            Key::F(3),
            Key::PageUp,
            Key::Space,
        ];
        for key in keys {
            assert_eq!(Key::from_name(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn event_builder() {
        let event = KeyEvent::new(Key::Enter)
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
            .repeated();
        assert!(event.repeat);
        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }
}
