#![forbid(unsafe_code)]

//! Change notification for stack snapshots.
//!
//! [`Subscribers<T>`] keeps callbacks as `Weak` references; the strong side
//! lives in the [`Subscription`] guard returned to the caller. Dropping the
//! guard unsubscribes. Dead entries are pruned lazily during notification.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. No `RefCell` borrow is held while a callback runs, so callbacks may
//!    subscribe, unsubscribe, or trigger nested notifications.
//! 3. A callback registered during a notification is not called for that
//!    notification.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

/// Ordered list of change callbacks.
pub struct Subscribers<T> {
    callbacks: RefCell<Vec<Weak<Callback<T>>>>,
}

impl<T: 'static> Subscribers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }

    /// Register `callback`. It stays registered while the returned guard lives.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Rc<Callback<T>> = Rc::new(callback);
        self.callbacks.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _callback: Box::new(strong),
        }
    }

    /// Call every live callback with `value`.
    pub fn notify(&self, value: &T) {
        self.notify_while(value, || true);
    }

    /// Like [`notify`](Self::notify), but stop as soon as `keep_going`
    /// returns `false`. The check runs before each callback.
    pub fn notify_while(&self, value: &T, mut keep_going: impl FnMut() -> bool) {
        let live: Vec<Rc<Callback<T>>> = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|w| w.strong_count() > 0);
            callbacks.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            if !keep_going() {
                break;
            }
            callback(value);
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("registered", &self.callbacks.borrow().len())
            .finish()
    }
}

/// RAII guard for a registered callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_in_registration_order() {
        let subs = Subscribers::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = subs.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let l2 = Rc::clone(&log);
        let _b = subs.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

        subs.notify(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn drop_unsubscribes() {
        let subs = Subscribers::<u32>::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let guard = subs.subscribe(move |_| h.set(h.get() + 1));
        subs.notify(&1);
        assert_eq!(subs.len(), 1);

        drop(guard);
        subs.notify(&2);
        assert_eq!(hits.get(), 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn callback_may_subscribe_during_notify() {
        let subs = Rc::new(Subscribers::<u32>::new());
        let late_hits = Rc::new(Cell::new(0));
        let late_guards = Rc::new(RefCell::new(Vec::new()));

        let subs2 = Rc::clone(&subs);
        let hits2 = Rc::clone(&late_hits);
        let guards2 = Rc::clone(&late_guards);
        let _outer = subs.subscribe(move |_| {
            let h = Rc::clone(&hits2);
            let guard = subs2.subscribe(move |_| h.set(h.get() + 1));
            guards2.borrow_mut().push(guard);
        });

        subs.notify(&1);
        // Registered mid-notify: not called for this round.
        assert_eq!(late_hits.get(), 0);

        subs.notify(&2);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn notify_while_stops_early() {
        let subs = Subscribers::<u32>::new();
        let hits = Rc::new(Cell::new(0));
        let guards: Vec<_> = (0..3)
            .map(|_| {
                let h = Rc::clone(&hits);
                subs.subscribe(move |_| h.set(h.get() + 1))
            })
            .collect();

        let mut budget = 2;
        subs.notify_while(&0, || {
            budget -= 1;
            budget >= 0
        });
        assert_eq!(hits.get(), 2);
        drop(guards);
    }
}
