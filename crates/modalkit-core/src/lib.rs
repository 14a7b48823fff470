#![forbid(unsafe_code)]

//! Modal stack store for modalkit.
//!
//! This crate provides:
//! - [`ModalStore`]: the ordered stack of active modals, with push, pop,
//!   resolution forwarding, dismissal gestures, and snapshot subscriptions
//! - [`ResolutionBroker`] / [`Resolution`]: settle-once futures, one per modal
//! - [`ResolvedValue`] / [`ResolveTrigger`]: what a modal resolves with and why
//!
//! The store is single-threaded (`Rc`-based) and never global: create one
//! with [`create_modal_store`] at bootstrap and pass clones where needed.

pub mod broker;
pub mod entry;
pub mod error;
pub mod id;
pub mod options;
pub mod store;
pub mod subscription;
pub mod trigger;

pub use broker::{Resolution, ResolutionBroker};
pub use entry::{
    BASE_MODAL_Z, Layer, ModalDescriptor, ModalEntry, Props, StackSnapshot, Z_INCREMENT,
};
pub use error::ModalError;
pub use id::ModalId;
pub use options::{Gesture, ModalOptions, StoreConfig};
pub use store::{ModalHandle, ModalStore};
pub use subscription::{Subscribers, Subscription};
pub use trigger::{ResolveTrigger, ResolvedValue};

/// Create an empty modal store with default configuration.
#[must_use]
pub fn create_modal_store<C: 'static>() -> ModalStore<C> {
    ModalStore::new()
}
