#![forbid(unsafe_code)]

//! Settle-once resolution futures.
//!
//! A [`ResolutionBroker`] pairs a one-shot sender with a shared receiver.
//! The broker keeps the sender; callers get [`Resolution`] futures that all
//! observe the same value.
//!
//! # Invariants
//!
//! 1. `settle` succeeds at most once. Later calls return `false` and leave
//!    the stored value unchanged.
//! 2. Every clone of a [`Resolution`] yields the value of the first settle.
//! 3. There is no rejection path. A broker dropped without settling leaves
//!    its futures pending forever.
//!
//! # Example
//!
//! ```
//! use futures::FutureExt;
//! use modalkit_core::broker::ResolutionBroker;
//!
//! let mut broker = ResolutionBroker::new();
//! let resolution = broker.resolution();
//! assert!(broker.settle(1));
//! assert!(!broker.settle(2));
//! assert_eq!(resolution.now_or_never(), Some(1));
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::Shared;

/// Owner side of a single resolution.
pub struct ResolutionBroker<R: Clone> {
    sender: Option<oneshot::Sender<R>>,
    resolution: Resolution<R>,
}

impl<R: Clone> ResolutionBroker<R> {
    /// Create an unsettled broker.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            sender: Some(sender),
            resolution: Resolution {
                inner: receiver.shared(),
            },
        }
    }

    /// Get a future for the eventual value.
    ///
    /// Every call returns a handle onto the same shared future.
    #[must_use]
    pub fn resolution(&self) -> Resolution<R> {
        self.resolution.clone()
    }

    /// Settle with `value`. Returns `false` if already settled.
    pub fn settle(&mut self, value: R) -> bool {
        match self.sender.take() {
            // A send error means every receiver is gone; nobody is waiting.
            Some(sender) => {
                let _ = sender.send(value);
                true
            }
            None => false,
        }
    }

    /// Whether `settle` has been called.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.sender.is_none()
    }
}

impl<R: Clone> Default for ResolutionBroker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> fmt::Debug for ResolutionBroker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionBroker")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Future for a broker's value.
///
/// Cheap to clone; all clones resolve to the same value.
pub struct Resolution<R: Clone> {
    inner: Shared<oneshot::Receiver<R>>,
}

impl<R: Clone> Resolution<R> {
    /// The settled value, if any, without waiting.
    #[must_use]
    pub fn peek(&self) -> Option<R> {
        self.inner.clone().now_or_never()?.ok()
    }

    /// Whether the broker has been settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.peek().is_some()
    }
}

impl<R: Clone> Clone for Resolution<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Clone> fmt::Debug for Resolution<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<R: Clone> Future for Resolution<R> {
    type Output = R;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<R> {
        match self.inner.poll_unpin(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(value),
            // Sender dropped unsettled: stay pending, there is no rejection path.
            Poll::Ready(Err(oneshot::Canceled)) | Poll::Pending => Poll::Pending,
        }
    }
}
