//! In-process host primitives driven explicitly by the caller.
//!
//! The CLI uses these to feed typed commands into the controllers, and tests
//! use them to simulate host events deterministically. Both expose counters
//! (`listener_count`, `active_timers`) so leaked registrations are visible.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use super::{
    Appearance, AppearanceCallback, AppearanceSource, AppearanceSubscription, IntervalScheduler,
    TickCallback, TimerHandle,
};
use crate::observe::{notify_all, ListenerId, Listeners};

#[derive(Debug, Default)]
struct AppearanceInner {
    current: Appearance,
    listeners: Listeners<Appearance>,
}

/// Appearance signal whose value is set by the caller.
#[derive(Debug, Clone, Default)]
pub struct ManualAppearance {
    inner: Arc<Mutex<AppearanceInner>>,
}

impl ManualAppearance {
    pub fn new(initial: Appearance) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppearanceInner {
                current: initial,
                listeners: Listeners::default(),
            })),
        }
    }

    /// Change the system appearance and notify every subscriber.
    ///
    /// Subscribers are notified even when the value is unchanged, matching
    /// hosts that re-deliver the current preference.
    pub fn set(&self, appearance: Appearance) {
        let snapshot = {
            let mut inner = lock(&self.inner);
            inner.current = appearance;
            inner.listeners.snapshot()
        };
        tracing::debug!(appearance = appearance.as_str(), "host appearance changed");
        notify_all(&snapshot, &appearance);
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

impl AppearanceSource for ManualAppearance {
    fn current_appearance(&self) -> Appearance {
        lock(&self.inner).current
    }

    fn subscribe(&self, callback: AppearanceCallback) -> Box<dyn AppearanceSubscription> {
        let id = lock(&self.inner).listeners.add(callback);
        Box::new(ManualSubscription {
            inner: Arc::downgrade(&self.inner),
            id: Some(id),
        })
    }
}

struct ManualSubscription {
    inner: Weak<Mutex<AppearanceInner>>,
    id: Option<ListenerId>,
}

impl AppearanceSubscription for ManualSubscription {
    fn remove(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).listeners.remove(id);
        }
    }
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        self.remove();
    }
}

#[derive(Default)]
struct SchedulerInner {
    next_id: u64,
    timers: Vec<(u64, Duration, TickCallback)>,
}

/// Interval scheduler whose ticks are fired by the caller.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one tick on every registered timer. Returns how many fired.
    pub fn fire(&self) -> usize {
        let ticks: Vec<TickCallback> = lock(&self.inner)
            .timers
            .iter()
            .map(|(_, _, tick)| Arc::clone(tick))
            .collect();
        for tick in &ticks {
            tick();
        }
        ticks.len()
    }

    /// Number of timers that have not been cancelled.
    pub fn active_timers(&self) -> usize {
        lock(&self.inner).timers.len()
    }

    /// Periods of the live timers, in registration order.
    pub fn periods(&self) -> Vec<Duration> {
        lock(&self.inner)
            .timers
            .iter()
            .map(|(_, period, _)| *period)
            .collect()
    }
}

impl IntervalScheduler for ManualScheduler {
    fn schedule(&self, period: Duration, tick: TickCallback) -> Box<dyn TimerHandle> {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.timers.push((id, period, tick));
        Box::new(ManualTimer {
            inner: Arc::downgrade(&self.inner),
            id: Some(id),
        })
    }
}

struct ManualTimer {
    inner: Weak<Mutex<SchedulerInner>>,
    id: Option<u64>,
}

impl TimerHandle for ManualTimer {
    fn cancel(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).timers.retain(|(timer_id, _, _)| *timer_id != id);
        }
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// A panicking listener must not wedge the host for everyone else.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
