#![forbid(unsafe_code)]

//! modalkit public facade.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use modalkit::prelude::*;
//!
//! let store = create_modal_store();
//! let mut shortcuts = Shortcuts::new();
//! bind_escape(&mut shortcuts, &store);
//!
//! let confirm = store
//!     .push(ModalDescriptor::new("ConfirmDialog").prop("title", "Discard changes?"))
//!     .unwrap();
//!
//! // The rendering layer forwards the dialog's own resolve event.
//! store.resolve_entry(confirm.id(), ResolvedValue::custom().with("confirmed", true));
//!
//! let value = block_on(confirm.resolve());
//! assert_eq!(value.trigger, ResolveTrigger::Custom);
//! assert_eq!(value.to_json()["confirmed"], true);
//! ```

pub mod escape;
#[cfg(feature = "tracing-json")]
pub mod logging;

pub use escape::{bind_escape, bind_gesture};
pub use modalkit_core::{
    Gesture, ModalDescriptor, ModalEntry, ModalError, ModalHandle, ModalId, ModalOptions,
    ModalStore, Resolution, ResolutionBroker, ResolveTrigger, ResolvedValue, StackSnapshot,
    StoreConfig, Subscription, create_modal_store,
};
pub use modalkit_keys::{
    Key, KeyCombo, KeyEvent, KeyParseError, Modifiers, ShortcutId, ShortcutOptions, Shortcuts,
};

pub mod prelude {
    //! Common imports.

    pub use crate::escape::{bind_escape, bind_gesture};
    pub use modalkit_core::{
        Gesture, ModalDescriptor, ModalError, ModalHandle, ModalId, ModalOptions, ModalStore,
        ResolveTrigger, ResolvedValue, StackSnapshot, Subscription, create_modal_store,
    };
    pub use modalkit_keys::{Key, KeyCombo, KeyEvent, Modifiers, Shortcuts};
}
