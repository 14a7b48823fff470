#![forbid(unsafe_code)]

//! Modal store: the ordered stack of active modals and their resolutions.
//!
//! The `ModalStore` tracks open modals bottom to top. Pushing a modal
//! returns a [`ModalHandle`] whose [`resolve`](ModalHandle::resolve) future
//! completes when the modal is removed, by whatever means.
//!
//! # Invariants
//!
//! - No two active entries share an id.
//! - Every entry on the stack has an unsettled broker; removal and
//!   settlement happen together, exactly once per entry.
//! - Order is insertion order; removal by id keeps the others in place.
//! - Every mutation publishes a new snapshot to subscribers before
//!   returning, and a subscriber never sees a snapshot older than one it
//!   has already received.
//!
//! # Failure Modes
//!
//! - `pop` / `resolve_entry` for an id that isn't active returns `false`.
//! - `push` with an explicit id that is already active returns
//!   [`ModalError::DuplicateId`] and leaves the stack untouched.
//! - A modal that is never removed leaves its future pending forever. Use
//!   [`pop_all`](ModalStore::pop_all) on teardown.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use modalkit_core::{ModalDescriptor, ModalStore, ResolveTrigger, ResolvedValue};
//!
//! let store = ModalStore::new();
//! let handle = store.push(ModalDescriptor::new("Confirm").id("m1")).unwrap();
//! assert_eq!(store.len(), 1);
//!
//! store.pop_with(handle.id(), ResolvedValue::new(ResolveTrigger::CloseButton));
//! assert!(store.is_empty());
//! assert_eq!(block_on(handle.resolve()).trigger, ResolveTrigger::CloseButton);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::broker::{Resolution, ResolutionBroker};
use crate::entry::{ModalDescriptor, ModalEntry, Props, StackSnapshot};
use crate::error::ModalError;
use crate::id::ModalId;
use crate::options::{Gesture, StoreConfig};
use crate::subscription::{Subscribers, Subscription};
use crate::trigger::{ResolveTrigger, ResolvedValue};

/// Returned by [`ModalStore::push`] and [`ModalStore::push_component`].
#[derive(Debug, Clone)]
pub struct ModalHandle {
    id: ModalId,
    resolution: Resolution<ResolvedValue>,
}

impl ModalHandle {
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// Future for the value this modal resolves with.
    ///
    /// Every call returns a handle onto the same shared future.
    #[must_use]
    pub fn resolve(&self) -> Resolution<ResolvedValue> {
        self.resolution.clone()
    }

    /// The resolved value, if the modal has already resolved.
    #[must_use]
    pub fn try_resolved(&self) -> Option<ResolvedValue> {
        self.resolution.peek()
    }
}

/// An entry on the stack together with its settle side.
struct ActiveModal<C> {
    entry: Rc<ModalEntry<C>>,
    broker: ResolutionBroker<ResolvedValue>,
}

struct StackState<C> {
    /// Active modals, bottom to top.
    modals: Vec<ActiveModal<C>>,
    config: StoreConfig,
    /// Bumped on every mutation.
    version: u64,
}

impl<C> StackState<C> {
    fn position(&self, id: &ModalId) -> Option<usize> {
        self.modals.iter().position(|m| m.entry.id() == id)
    }

    fn fresh_id(&self) -> ModalId {
        loop {
            let id = ModalId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn insert(&mut self, entry: ModalEntry<C>) -> ModalHandle {
        let broker = ResolutionBroker::new();
        let handle = ModalHandle {
            id: entry.id().clone(),
            resolution: broker.resolution(),
        };
        self.modals.push(ActiveModal {
            entry: Rc::new(entry),
            broker,
        });
        self.version += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(modal_id = %handle.id, depth = self.modals.len(), "modal pushed");
        handle
    }

    fn snapshot(&self) -> StackSnapshot<C> {
        StackSnapshot::new(
            self.modals.iter().map(|m| Rc::clone(&m.entry)).collect(),
            self.version,
        )
    }
}

struct StoreInner<C> {
    state: RefCell<StackState<C>>,
    subscribers: Subscribers<StackSnapshot<C>>,
}

/// Stack of active modals with settle-once resolutions.
///
/// Cloning a `ModalStore` yields another handle onto the same stack, so the
/// store can be passed into callbacks and rendering code.
pub struct ModalStore<C> {
    inner: Rc<StoreInner<C>>,
}

impl<C> Clone for ModalStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: 'static> Default for ModalStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ModalStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ModalStore")
            .field("depth", &state.modals.len())
            .field("version", &state.version)
            .field("subscribers", &self.inner.subscribers)
            .finish()
    }
}

impl<C: 'static> ModalStore<C> {
    /// Create an empty store with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(StackState {
                    modals: Vec::new(),
                    config,
                    version: 0,
                }),
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// The configuration this store was created with.
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.inner.state.borrow().config
    }

    // --- Stack Operations ---

    /// Push a modal on top of the stack.
    ///
    /// # Errors
    ///
    /// [`ModalError::DuplicateId`] if the descriptor names an id that is
    /// already active.
    pub fn push(&self, descriptor: ModalDescriptor<C>) -> Result<ModalHandle, ModalError> {
        let ModalDescriptor {
            component,
            id,
            props,
            options,
        } = descriptor;

        let handle = {
            let mut state = self.inner.state.borrow_mut();
            let id = match id {
                Some(id) if state.position(&id).is_some() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(modal_id = %id, "rejected push with duplicate modal id");
                    return Err(ModalError::DuplicateId(id));
                }
                Some(id) => id,
                None => state.fresh_id(),
            };
            let options = options.unwrap_or(state.config.default_options);
            state.insert(ModalEntry::new(id, component, props, options))
        };

        self.publish();
        Ok(handle)
    }

    /// Push a bare component with a generated id, no props, and the store's
    /// default options.
    pub fn push_component(&self, component: C) -> ModalHandle {
        let handle = {
            let mut state = self.inner.state.borrow_mut();
            let id = state.fresh_id();
            let options = state.config.default_options;
            state.insert(ModalEntry::new(id, component, Props::new(), options))
        };

        self.publish();
        handle
    }

    /// Pop a modal programmatically, resolving it with trigger `pop`.
    ///
    /// Returns `false` if the id isn't active.
    pub fn pop(&self, id: &ModalId) -> bool {
        self.resolve_entry(id, ResolvedValue::new(ResolveTrigger::Pop))
    }

    /// Pop a modal with an explicit resolution value.
    pub fn pop_with(&self, id: &ModalId, value: ResolvedValue) -> bool {
        self.resolve_entry(id, value)
    }

    /// Pop the top modal with trigger `pop`.
    pub fn pop_top(&self) -> Option<ModalId> {
        let id = self.top_id()?;
        self.pop(&id).then_some(id)
    }

    /// Remove a modal and settle its resolution with `value`.
    ///
    /// This is the entry point for the rendering layer when a hosted
    /// component resolves itself or a dismissal gesture fires. Returns
    /// `false` (and does nothing) if the id isn't active, so racing
    /// triggers collapse into a single resolution.
    pub fn resolve_entry(&self, id: &ModalId, value: ResolvedValue) -> bool {
        let removed = {
            let mut state = self.inner.state.borrow_mut();
            match state.position(id) {
                Some(idx) => {
                    let modal = state.modals.remove(idx);
                    state.version += 1;
                    Some(modal)
                }
                None => None,
            }
        };

        let Some(mut modal) = removed else {
            #[cfg(feature = "tracing")]
            tracing::trace!(modal_id = %id, trigger = %value.trigger, "resolve for inactive modal ignored");
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            modal_id = %id,
            trigger = %value.trigger,
            depth = self.len(),
            "modal resolved"
        );
        modal.broker.settle(value);
        self.publish();
        true
    }

    /// Decode a raw payload from a hosted component and resolve with it.
    ///
    /// # Errors
    ///
    /// [`ModalError::InvalidPayload`] if the payload can't be decoded. The
    /// modal stays active in that case.
    pub fn resolve_entry_json(&self, id: &ModalId, payload: Value) -> Result<bool, ModalError> {
        let value = ResolvedValue::from_json(payload)?;
        Ok(self.resolve_entry(id, value))
    }

    /// Apply a dismissal gesture to a modal.
    ///
    /// Resolves with the gesture's trigger if the modal's options allow it;
    /// otherwise nothing happens and `false` is returned.
    pub fn dismiss(&self, id: &ModalId, gesture: Gesture) -> bool {
        let allowed = match self.entry(id) {
            Some(entry) => entry.options().allows(gesture),
            None => return false,
        };
        if !allowed {
            #[cfg(feature = "tracing")]
            tracing::trace!(modal_id = %id, ?gesture, "gesture disabled for modal");
            return false;
        }
        self.resolve_entry(id, ResolvedValue::new(gesture.trigger()))
    }

    /// Apply a dismissal gesture to the top modal only.
    ///
    /// Returns the id of the modal that was dismissed.
    pub fn dismiss_top(&self, gesture: Gesture) -> Option<ModalId> {
        let id = self.top_id()?;
        self.dismiss(&id, gesture).then_some(id)
    }

    /// Remove every modal, top first, resolving each with a clone of `value`.
    ///
    /// Intended for teardown so no caller is left awaiting forever. Publishes
    /// a single snapshot. Returns how many modals were resolved.
    pub fn pop_all(&self, value: ResolvedValue) -> usize {
        let drained: Vec<ActiveModal<C>> = {
            let mut state = self.inner.state.borrow_mut();
            if state.modals.is_empty() {
                return 0;
            }
            state.version += 1;
            state.modals.drain(..).rev().collect()
        };

        let count = drained.len();
        for mut modal in drained {
            modal.broker.settle(value.clone());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(count, trigger = %value.trigger, "all modals resolved");
        self.publish();
        count
    }

    // --- State Queries ---

    /// Current stack, bottom to top.
    #[must_use]
    pub fn snapshot(&self) -> StackSnapshot<C> {
        self.inner.state.borrow().snapshot()
    }

    /// Number of active modals.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.borrow().modals.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a modal with this id is active.
    #[must_use]
    pub fn contains(&self, id: &ModalId) -> bool {
        self.inner.state.borrow().position(id).is_some()
    }

    /// Id of the top modal, if any.
    #[must_use]
    pub fn top_id(&self) -> Option<ModalId> {
        self.inner
            .state
            .borrow()
            .modals
            .last()
            .map(|m| m.entry.id().clone())
    }

    /// Look up an active entry.
    #[must_use]
    pub fn entry(&self, id: &ModalId) -> Option<Rc<ModalEntry<C>>> {
        let state = self.inner.state.borrow();
        state.position(id).map(|idx| Rc::clone(&state.modals[idx].entry))
    }

    // --- Observation ---

    /// Observe the stack.
    ///
    /// `callback` runs once immediately with the current snapshot, then
    /// after every mutation. It may call back into the store.
    pub fn subscribe(&self, callback: impl Fn(&StackSnapshot<C>) + 'static) -> Subscription {
        // Register before the first delivery so a mutation made from inside
        // it is seen by this callback too.
        let callback = Rc::new(callback);
        let registered = Rc::clone(&callback);
        let subscription = self
            .inner
            .subscribers
            .subscribe(move |snapshot| (*registered)(snapshot));
        (*callback)(&self.snapshot());
        subscription
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let version = snapshot.version();
        // A callback that mutates the store publishes a newer snapshot to
        // everyone; stop delivering this one once that happens.
        self.inner
            .subscribers
            .notify_while(&snapshot, || self.inner.state.borrow().version == version);
    }
}
