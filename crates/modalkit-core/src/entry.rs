#![forbid(unsafe_code)]

//! Modal entries, push descriptors, and stack snapshots.
//!
//! # Invariants
//!
//! - A [`StackSnapshot`] is ordered bottom to top: index 0 is the oldest
//!   modal, the last element is the one on top.
//! - Z-order is strictly increasing with position.
//! - Snapshots are immutable; a mutation of the store produces a new one
//!   with a higher [`version`](StackSnapshot::version).

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::id::ModalId;
use crate::options::ModalOptions;

/// Base z-index for the modal layer.
pub const BASE_MODAL_Z: u32 = 1000;

/// Z-index increment between modals (leaves room for internal layers).
pub const Z_INCREMENT: u32 = 10;

/// Data handed to a modal's component. Opaque to the store.
pub type Props = Map<String, Value>;

/// What to push: a component plus optional id, props and options.
///
/// `store.push(ModalDescriptor::new(component).id("m1"))` names the modal;
/// [`ModalStore::push_component`](crate::ModalStore::push_component) is the
/// shorthand for a bare component.
#[derive(Debug, Clone)]
pub struct ModalDescriptor<C> {
    pub component: C,
    pub id: Option<ModalId>,
    pub props: Props,
    pub options: Option<ModalOptions>,
}

impl<C> ModalDescriptor<C> {
    /// Describe a modal rendering `component`.
    pub fn new(component: C) -> Self {
        Self {
            component,
            id: None,
            props: Props::new(),
            options: None,
        }
    }

    /// Use an explicit id instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<ModalId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace all props.
    #[must_use]
    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Set a single prop.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Override the store's default options for this modal.
    #[must_use]
    pub fn options(mut self, options: ModalOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// One active modal.
#[derive(Debug)]
pub struct ModalEntry<C> {
    id: ModalId,
    component: C,
    props: Props,
    options: ModalOptions,
}

impl<C> ModalEntry<C> {
    pub(crate) fn new(id: ModalId, component: C, props: Props, options: ModalOptions) -> Self {
        Self {
            id,
            component,
            props,
            options,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// The component to mount.
    #[inline]
    #[must_use]
    pub fn component(&self) -> &C {
        &self.component
    }

    #[inline]
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Dismissal options in effect for this modal.
    #[inline]
    #[must_use]
    pub fn options(&self) -> ModalOptions {
        self.options
    }
}

/// A modal's place in the rendered stack.
#[derive(Debug)]
pub struct Layer<'a, C> {
    pub entry: &'a Rc<ModalEntry<C>>,
    pub z_index: u32,
    /// Only the top layer receives input.
    pub is_top: bool,
}

/// Immutable view of the stack at one point in time.
pub struct StackSnapshot<C> {
    entries: Rc<[Rc<ModalEntry<C>>]>,
    version: u64,
}

impl<C> StackSnapshot<C> {
    pub(crate) fn new(entries: Vec<Rc<ModalEntry<C>>>, version: u64) -> Self {
        Self {
            entries: entries.into(),
            version,
        }
    }

    /// Mutation counter of the store when this snapshot was taken.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The top (most recently pushed) entry.
    #[must_use]
    pub fn top(&self) -> Option<&Rc<ModalEntry<C>>> {
        self.entries.last()
    }

    /// Ids in stack order.
    pub fn ids(&self) -> impl Iterator<Item = &ModalId> {
        self.entries.iter().map(|e| e.id())
    }

    /// Entries paired with their z-index, bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_, C>> {
        let top = self.entries.len().checked_sub(1);
        self.entries.iter().enumerate().map(move |(i, entry)| Layer {
            entry,
            z_index: BASE_MODAL_Z + Z_INCREMENT * i as u32,
            is_top: Some(i) == top,
        })
    }
}

impl<C> Clone for StackSnapshot<C> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            version: self.version,
        }
    }
}

impl<C> Deref for StackSnapshot<C> {
    type Target = [Rc<ModalEntry<C>>];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<C> fmt::Debug for StackSnapshot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackSnapshot")
            .field("version", &self.version)
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str) -> Rc<ModalEntry<&'static str>> {
        Rc::new(ModalEntry::new(
            ModalId::from(id),
            "Dialog",
            Props::new(),
            ModalOptions::default(),
        ))
    }

    #[test]
    fn descriptor_defaults() {
        let desc = ModalDescriptor::new("Confirm");
        assert_eq!(desc.component, "Confirm");
        assert!(desc.id.is_none());
        assert!(desc.props.is_empty());
        assert!(desc.options.is_none());
    }

    #[test]
    fn descriptor_builder() {
        let desc = ModalDescriptor::new("Confirm")
            .id("confirm")
            .prop("title", "Delete?")
            .prop("count", 3)
            .options(ModalOptions::locked());
        assert_eq!(desc.id, Some(ModalId::from("confirm")));
        assert_eq!(desc.props.get("title"), Some(&json!("Delete?")));
        assert_eq!(desc.props.get("count"), Some(&json!(3)));
        assert_eq!(desc.options, Some(ModalOptions::locked()));
    }

    #[test]
    fn empty_snapshot() {
        let snap = StackSnapshot::<&str>::new(Vec::new(), 0);
        assert!(snap.is_empty());
        assert!(snap.top().is_none());
        assert_eq!(snap.layers().count(), 0);
    }

    #[test]
    fn layers_are_bottom_to_top() {
        let snap = StackSnapshot::new(vec![entry("a"), entry("b"), entry("c")], 3);
        let layers: Vec<_> = snap.layers().collect();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].entry.id(), "a");
        assert_eq!(layers[0].z_index, BASE_MODAL_Z);
        assert_eq!(layers[2].z_index, BASE_MODAL_Z + 2 * Z_INCREMENT);
        assert!(!layers[0].is_top);
        assert!(!layers[1].is_top);
        assert!(layers[2].is_top);
        for pair in layers.windows(2) {
            assert!(pair[1].z_index > pair[0].z_index);
        }
    }

    #[test]
    fn snapshot_clone_shares_entries() {
        let snap = StackSnapshot::new(vec![entry("a")], 1);
        let copy = snap.clone();
        assert!(Rc::ptr_eq(&snap[0], &copy[0]));
        assert_eq!(copy.version(), 1);
        assert_eq!(snap.ids().collect::<Vec<_>>(), vec!["a"]);
    }
}
