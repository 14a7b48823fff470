#![forbid(unsafe_code)]

//! Wiring between keyboard shortcuts and the modal store.

use modalkit_core::{Gesture, ModalStore};
use modalkit_keys::{KeyCombo, ShortcutId, ShortcutOptions, Shortcuts};

/// Register Escape to dismiss the top modal.
///
/// The modal's own options still apply: a modal with
/// `close_on_escape(false)` stays open. Auto-repeat is ignored so holding
/// Escape closes one modal, not the whole stack.
pub fn bind_escape<C: 'static>(shortcuts: &mut Shortcuts, store: &ModalStore<C>) -> ShortcutId {
    bind_gesture(shortcuts, KeyCombo::ESCAPE, store, Gesture::Escape)
}

/// Register `combo` to apply `gesture` to the top modal.
pub fn bind_gesture<C: 'static>(
    shortcuts: &mut Shortcuts,
    combo: KeyCombo,
    store: &ModalStore<C>,
    gesture: Gesture,
) -> ShortcutId {
    let store = store.clone();
    shortcuts.register_with(
        combo,
        ShortcutOptions {
            allow_repeat: false,
        },
        move |_| {
            let dismissed = store.dismiss_top(gesture);
            #[cfg(feature = "tracing")]
            if let Some(id) = &dismissed {
                tracing::debug!(modal_id = %id, %combo, "modal dismissed by shortcut");
            }
            drop(dismissed);
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use modalkit_core::{ModalDescriptor, ModalOptions, ResolveTrigger};
    use modalkit_keys::{Key, KeyEvent, Modifiers};

    #[test]
    fn escape_dismisses_top() {
        let store = ModalStore::new();
        let mut shortcuts = Shortcuts::new();
        bind_escape(&mut shortcuts, &store);

        let a = store.push_component("A");
        let b = store.push_component("B");

        assert_eq!(shortcuts.dispatch(&KeyEvent::new(Key::Escape)), 1);
        assert!(store.contains(a.id()));
        assert!(!store.contains(b.id()));
        assert_eq!(
            b.try_resolved().map(|v| v.trigger),
            Some(ResolveTrigger::Escape)
        );
    }

    #[test]
    fn escape_respects_options() {
        let store = ModalStore::new();
        let mut shortcuts = Shortcuts::new();
        bind_escape(&mut shortcuts, &store);

        let handle = store
            .push(ModalDescriptor::new("Locked").options(ModalOptions::new().close_on_escape(false)))
            .unwrap();
        shortcuts.dispatch(&KeyEvent::new(Key::Escape));
        assert!(store.contains(handle.id()));
    }

    #[test]
    fn held_escape_closes_one() {
        let store = ModalStore::new();
        let mut shortcuts = Shortcuts::new();
        bind_escape(&mut shortcuts, &store);
        store.push_component("A");
        store.push_component("B");

        shortcuts.dispatch(&KeyEvent::new(Key::Escape));
        shortcuts.dispatch(&KeyEvent::new(Key::Escape).repeated());
        shortcuts.dispatch(&KeyEvent::new(Key::Escape).repeated());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn escape_on_empty_store_is_harmless() {
        let store = ModalStore::<&str>::new();
        let mut shortcuts = Shortcuts::new();
        bind_escape(&mut shortcuts, &store);
        assert_eq!(shortcuts.dispatch(&KeyEvent::new(Key::Escape)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn custom_gesture_binding() {
        let store = ModalStore::new();
        let mut shortcuts = Shortcuts::new();
        let combo = KeyCombo::new(Key::char('w'), Modifiers::CTRL);
        bind_gesture(&mut shortcuts, combo, &store, Gesture::CloseButton);

        let handle = store.push_component("Doc");
        shortcuts.dispatch(&KeyEvent::new(Key::char('w')).with_modifiers(Modifiers::CTRL));
        assert_eq!(
            handle.try_resolved().map(|v| v.trigger),
            Some(ResolveTrigger::CloseButton)
        );
    }
}
