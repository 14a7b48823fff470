#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modalkit_core::{Gesture, ModalDescriptor, ModalId, ModalStore, ResolveTrigger, ResolvedValue};

#[derive(Debug, Arbitrary)]
enum Op {
    Push,
    PushNamed(u8),
    Pop(u8),
    Dismiss(u8, u8),
    PopTop,
    PopAll,
}

fuzz_target!(|ops: Vec<Op>| {
    let store = ModalStore::new();
    let mut handles = Vec::new();

    for op in ops {
        match op {
            Op::Push => handles.push(store.push_component("M")),
            Op::PushNamed(n) => {
                if let Ok(h) = store.push(ModalDescriptor::new("M").id(format!("n{}", n % 8))) {
                    handles.push(h);
                }
            }
            Op::Pop(n) => {
                store.pop(&ModalId::new(format!("n{}", n % 8)));
            }
            Op::Dismiss(n, g) => {
                let gesture = [
                    Gesture::Backdrop,
                    Gesture::Escape,
                    Gesture::ClickOutside,
                    Gesture::CloseButton,
                ][g as usize % 4];
                if let Some(h) = handles.get(n as usize % handles.len().max(1)) {
                    store.dismiss(h.id(), gesture);
                }
            }
            Op::PopTop => {
                store.pop_top();
            }
            Op::PopAll => {
                store.pop_all(ResolvedValue::new(ResolveTrigger::Pop));
            }
        }

        // Active entries are exactly the unresolved handles.
        handles.retain(|h| h.try_resolved().is_none());
        assert_eq!(store.len(), handles.len());
        for h in &handles {
            assert!(store.contains(h.id()));
        }
    }
});
