#![forbid(unsafe_code)]

//! Shortcut registry: maps key events to callbacks.
//!
//! Matching is stateless: an event fires every registered shortcut whose
//! [`KeyCombo`] it matches exactly, in registration order. The registry
//! knows nothing about what the callbacks do.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use modalkit_keys::{Key, KeyEvent, Modifiers, Shortcuts};
//!
//! let saved = Rc::new(Cell::new(false));
//! let mut shortcuts = Shortcuts::new();
//! let flag = Rc::clone(&saved);
//! shortcuts.register("Ctrl+S".parse().unwrap(), move |_| flag.set(true));
//!
//! let fired = shortcuts.dispatch(&KeyEvent::new(Key::char('s')).with_modifiers(Modifiers::CTRL));
//! assert_eq!(fired, 1);
//! assert!(saved.get());
//! ```

use std::fmt;

use crate::combo::KeyCombo;
use crate::key::KeyEvent;

/// Identifies a registered shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutId(u64);

/// Per-shortcut behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutOptions {
    /// Fire on auto-repeat events from a held key.
    pub allow_repeat: bool,
}

impl Default for ShortcutOptions {
    fn default() -> Self {
        Self { allow_repeat: true }
    }
}

struct Binding {
    id: ShortcutId,
    combo: KeyCombo,
    options: ShortcutOptions,
    callback: Box<dyn FnMut(&KeyEvent)>,
}

/// Registered shortcuts, in registration order.
pub struct Shortcuts {
    bindings: Vec<Binding>,
    next_id: u64,
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shortcuts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|b| (b.id, b.combo.to_string())))
            .finish()
    }
}

impl Shortcuts {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            next_id: 1,
        }
    }

    /// Register `callback` for `combo` with default options.
    pub fn register(
        &mut self,
        combo: KeyCombo,
        callback: impl FnMut(&KeyEvent) + 'static,
    ) -> ShortcutId {
        self.register_with(combo, ShortcutOptions::default(), callback)
    }

    /// Register `callback` for `combo`.
    pub fn register_with(
        &mut self,
        combo: KeyCombo,
        options: ShortcutOptions,
        callback: impl FnMut(&KeyEvent) + 'static,
    ) -> ShortcutId {
        let id = ShortcutId(self.next_id);
        self.next_id += 1;
        self.bindings.push(Binding {
            id,
            combo,
            options,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a shortcut. Returns `false` if it wasn't registered.
    pub fn unregister(&mut self, id: ShortcutId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != id);
        self.bindings.len() != before
    }

    /// Fire every shortcut matching `event`. Returns how many fired.
    pub fn dispatch(&mut self, event: &KeyEvent) -> usize {
        let mut fired = 0;
        for binding in &mut self.bindings {
            if !binding.combo.matches(event) {
                continue;
            }
            if event.repeat && !binding.options.allow_repeat {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(combo = %binding.combo, "shortcut fired");
            (binding.callback)(event);
            fired += 1;
        }
        fired
    }

    /// Combos currently registered, in registration order.
    pub fn combos(&self) -> impl Iterator<Item = KeyCombo> + '_ {
        self.bindings.iter().map(|b| b.combo)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnMut(&KeyEvent)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let make = move |name: &'static str| {
            let l = Rc::clone(&l);
            Box::new(move |_: &KeyEvent| l.borrow_mut().push(name)) as Box<dyn FnMut(&KeyEvent)>
        };
        (log, make)
    }

    #[test]
    fn no_match_fires_nothing() {
        let (log, make) = recorder();
        let mut shortcuts = Shortcuts::new();
        shortcuts.register(KeyCombo::ESCAPE, make("esc"));
        assert_eq!(shortcuts.dispatch(&KeyEvent::new(Key::Enter)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn all_matches_fire_in_order() {
        let (log, make) = recorder();
        let mut shortcuts = Shortcuts::new();
        shortcuts.register(KeyCombo::ESCAPE, make("first"));
        shortcuts.register("Ctrl+Q".parse().unwrap(), make("quit"));
        shortcuts.register(KeyCombo::ESCAPE, make("second"));

        assert_eq!(shortcuts.dispatch(&KeyEvent::new(Key::Escape)), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn modifiers_must_match() {
        let (log, make) = recorder();
        let mut shortcuts = Shortcuts::new();
        shortcuts.register(KeyCombo::ESCAPE, make("esc"));
        let shifted = KeyEvent::new(Key::Escape).with_modifiers(Modifiers::SHIFT);
        assert_eq!(shortcuts.dispatch(&shifted), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unregister_stops_firing() {
        let (log, make) = recorder();
        let mut shortcuts = Shortcuts::new();
        let id = shortcuts.register(KeyCombo::ESCAPE, make("esc"));
        assert!(shortcuts.unregister(id));
        assert!(!shortcuts.unregister(id));
        assert!(shortcuts.is_empty());
        assert_eq!(shortcuts.dispatch(&KeyEvent::new(Key::Escape)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn repeat_filtering() {
        let (log, make) = recorder();
        let mut shortcuts = Shortcuts::new();
        shortcuts.register_with(
            KeyCombo::ESCAPE,
            ShortcutOptions { allow_repeat: false },
            make("once"),
        );
        shortcuts.register(KeyCombo::ESCAPE, make("always"));

        shortcuts.dispatch(&KeyEvent::new(Key::Escape).repeated());
        assert_eq!(*log.borrow(), vec!["always"]);
    }

    #[test]
    fn ids_are_unique_and_combos_listed() {
        let mut shortcuts = Shortcuts::new();
        let a = shortcuts.register(KeyCombo::ESCAPE, |_| {});
        let b = shortcuts.register("Alt+F4".parse().unwrap(), |_| {});
        assert_ne!(a, b);
        assert_eq!(shortcuts.len(), 2);
        let combos: Vec<String> = shortcuts.combos().map(|c| c.to_string()).collect();
        assert_eq!(combos, vec!["Escape", "Alt+F4"]);
    }
}
