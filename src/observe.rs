//! Listener registry used by controllers to publish state changes.
//!
//! Listeners are stored as shared closures so a controller can snapshot the
//! list under its state lock and invoke them after the lock is released.
//! [`Delivery`] tracks those out-of-lock notifications so disposal can wait
//! for them to drain.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

/// Opaque handle returned by [`Listeners::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Shared listener callback.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered set of listeners for one kind of state change.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<T> Listeners<T> {
    /// Register a listener; notifications are delivered in registration order.
    pub fn add(&mut self, listener: Listener<T>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns false when the id is unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clone the current listener list so it can be invoked without holding
    /// whatever lock guards this registry.
    pub fn snapshot(&self) -> Vec<Listener<T>> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Invoke every listener in `snapshot` with `value`.
pub fn notify_all<T>(snapshot: &[Listener<T>], value: &T) {
    for listener in snapshot {
        listener(value);
    }
}

/// Gate for notifications delivered outside a controller's state lock.
///
/// A controller calls [`Delivery::begin`] while still holding its state lock
/// (after checking it is live), releases the lock, then notifies through the
/// returned guard. [`Delivery::close`] blocks until every delivery running on
/// another thread has finished; afterwards no listener is invoked. A listener
/// that closes its own controller does not wait on itself, and the rest of
/// its snapshot is skipped.
#[derive(Debug, Default)]
pub struct Delivery {
    state: Mutex<DeliveryState>,
    idle: Condvar,
}

#[derive(Debug, Default)]
struct DeliveryState {
    closed: bool,
    active: Vec<ThreadId>,
}

impl Delivery {
    /// Register a delivery on the calling thread. `None` once closed.
    pub fn begin(&self) -> Option<DeliveryGuard<'_>> {
        let mut state = self.lock();
        if state.closed {
            return None;
        }
        let thread = thread::current().id();
        state.active.push(thread);
        Some(DeliveryGuard {
            delivery: self,
            thread,
        })
    }

    /// Stop new deliveries and wait for in-flight ones on other threads.
    pub fn close(&self) {
        let me = thread::current().id();
        let mut state = self.lock();
        state.closed = true;
        while state.active.iter().any(|id| *id != me) {
            state = self
                .idle
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, DeliveryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An in-flight delivery; ends on drop (including unwinding out of a listener).
#[must_use = "dropping the guard ends the delivery"]
pub struct DeliveryGuard<'a> {
    delivery: &'a Delivery,
    thread: ThreadId,
}

impl DeliveryGuard<'_> {
    /// Invoke each listener in order, stopping early if the gate was closed.
    pub fn notify<T>(&self, snapshot: &[Listener<T>], value: &T) {
        for listener in snapshot {
            if self.delivery.is_closed() {
                return;
            }
            listener(value);
        }
    }
}

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.delivery.lock();
        if let Some(pos) = state.active.iter().position(|id| *id == self.thread) {
            state.active.swap_remove(pos);
        }
        drop(state);
        self.delivery.idle.notify_all();
    }
}
