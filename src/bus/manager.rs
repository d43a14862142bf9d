//! Selection bus implementation.

use crate::types::SelectionEvent;
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to an active subscription.
///
/// Pass it back to [`SelectionBus::unsubscribe`] to stop receiving events.
/// Unsubscribing a stale handle is a safe no-op.
#[derive(Debug)]
pub struct Subscription {
    pub(crate) id: SubscriptionId,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

type Callback = Arc<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Pending work while a dispatch is in flight.
struct DispatchState {
    dispatching: bool,
    queued: VecDeque<SelectionEvent>,
}

/// Broadcasts selection events to registered callbacks.
///
/// Strictly in-process, fire-and-forget: no persistence, no replay, no
/// cross-page delivery.
pub struct SelectionBus {
    /// Active subscribers. Keys are monotonically increasing, so iteration
    /// order is registration order.
    subscribers: Mutex<BTreeMap<SubscriptionId, Callback>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
    /// Nested-publish queue (see module docs).
    dispatch: Mutex<DispatchState>,
}

impl SelectionBus {
    /// Create a new bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            dispatch: Mutex::new(DispatchState {
                dispatching: false,
                queued: VecDeque::new(),
            }),
        }
    }

    /// Register a callback and return its handle.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().insert(id, Arc::new(callback));
        Subscription { id }
    }

    /// Remove a callback. Stale or repeated handles are a safe no-op.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers.lock().remove(&subscription.id);
    }

    /// Remove a callback by id, if any is registered under it.
    pub fn unsubscribe_id(&self, id: SubscriptionId) {
        self.subscribers.lock().remove(&id);
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver an event to every current subscriber, in registration order.
    ///
    /// Returns once all callbacks have completed. If called from inside a
    /// subscriber callback, the event is queued and delivered after the
    /// in-flight dispatch finishes.
    pub fn publish(&self, event: SelectionEvent) {
        {
            let mut state = self.dispatch.lock();
            if state.dispatching {
                state.queued.push_back(event);
                return;
            }
            state.dispatching = true;
        }

        let mut next = Some(event);
        while let Some(event) = next {
            self.deliver(&event);
            let mut state = self.dispatch.lock();
            next = state.queued.pop_front();
            if next.is_none() {
                state.dispatching = false;
            }
        }
    }

    /// Fan one event out to a snapshot of the current subscribers.
    ///
    /// The snapshot is taken before any callback runs, so subscribers added
    /// or removed during delivery take effect from the next publish. The
    /// lock is not held across callbacks, which keeps reentrant
    /// subscribe/unsubscribe calls safe.
    fn deliver(&self, event: &SelectionEvent) {
        let snapshot: Vec<(SubscriptionId, Callback)> = self
            .subscribers
            .lock()
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        for (id, callback) in snapshot {
            // Still registered? A callback earlier in this fan-out may have
            // unsubscribed a later one.
            if !self.subscribers.lock().contains_key(&id) {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                warn!(subscription = id.0, "subscriber panicked during selection dispatch");
            }
        }
    }
}

impl Default for SelectionBus {
    fn default() -> Self {
        Self::new()
    }
}
