#![forbid(unsafe_code)]

//! Property tests for combo parsing and shortcut dispatch.

use modalkit_keys::{Key, KeyCombo, KeyEvent, Modifiers, Shortcuts};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        proptest::char::range('a', 'z').prop_map(Key::char),
        proptest::char::range('0', '9').prop_map(Key::char),
        prop::sample::select(vec!['+', '-', '=', '/', ',', '.']).prop_map(Key::char),
        (1u8..=24).prop_map(Key::F),
        prop::sample::select(vec![
            Key::Escape,
            Key::Enter,
            Key::Tab,
            Key::Space,
            Key::Backspace,
            Key::Delete,
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Home,
            Key::End,
            Key::PageUp,
            Key::PageDown,
        ]),
    ]
}

fn modifiers() -> impl Strategy<Value = Modifiers> {
    (0u8..16).prop_map(Modifiers::from_bits_truncate)
}

fn combo() -> impl Strategy<Value = KeyCombo> {
    (key(), modifiers()).prop_map(|(k, m)| KeyCombo::new(k, m))
}

proptest! {
    /// Parsing arbitrary text returns a result, never panics.
    #[test]
    fn parse_is_total(input in ".{0,24}") {
        let _ = input.parse::<KeyCombo>();
    }

    /// The canonical string form parses back to the same combo.
    #[test]
    fn display_parses_back(combo in combo()) {
        let text = combo.to_string();
        prop_assert_eq!(text.parse::<KeyCombo>(), Ok(combo));
    }

    /// A combo matches an event only when key and modifier set are identical.
    #[test]
    fn matching_is_exact(combo in combo(), key in key(), held in modifiers()) {
        let event = KeyEvent::new(key).with_modifiers(held);
        prop_assert_eq!(combo.matches(&event), combo.key == key && combo.modifiers == held);
    }

    /// Events carrying an uppercase character match the lowercase combo.
    #[test]
    fn matching_ignores_reported_case(c in proptest::char::range('a', 'z'), held in modifiers()) {
        let combo = KeyCombo::new(Key::char(c), held);
        let event = KeyEvent {
            key: Key::Char(c.to_ascii_uppercase()),
            modifiers: held,
            repeat: false,
        };
        prop_assert!(combo.matches(&event));
    }

    /// Dispatch fires exactly the registered combos that match.
    #[test]
    fn dispatch_counts_matches(combos in prop::collection::vec(combo(), 0..12), pressed in combo()) {
        let mut shortcuts = Shortcuts::new();
        for c in &combos {
            shortcuts.register(*c, |_| {});
        }
        let event = KeyEvent::new(pressed.key).with_modifiers(pressed.modifiers);
        let expected = combos.iter().filter(|c| c.matches(&event)).count();
        prop_assert_eq!(shortcuts.dispatch(&event), expected);
    }
}
