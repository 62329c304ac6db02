//! Media rotation controller.
//!
//! Selects which playlist entry the presentation layer shows. A recurring
//! timer and the end-of-playback signal both trigger a rotation, and both use
//! the same rule: an independent uniform draw, repeats allowed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::{IndexSource, Playlist, RandomIndex};
use crate::error::ControllerError;
use crate::host::{IntervalScheduler, TimerHandle};
use crate::observe::{Delivery, ListenerId, Listeners};

/// Default time between timer-driven rotations.
pub const DEFAULT_ROTATION_PERIOD: Duration = Duration::from_secs(10);

const NAME: &str = "media rotator";

/// Currently selected playlist entry, as delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub resource: String,
}

/// Rotation tuning passed to [`MediaRotator::initialize_with`].
pub struct RotationOptions {
    pub period: Duration,
    pub indices: Box<dyn IndexSource>,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_ROTATION_PERIOD,
            indices: Box::new(RandomIndex::from_entropy()),
        }
    }
}

/// What caused a rotation; only used for logging.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Timer,
    Ended,
}

struct RotatorInner {
    playlist: Playlist,
    index: usize,
    indices: Box<dyn IndexSource>,
    listeners: Listeners<Selection>,
    disposed: bool,
}

/// State plus the gate for notifications delivered outside its lock.
struct Shared {
    state: Mutex<RotatorInner>,
    delivery: Delivery,
}

impl RotatorInner {
    fn draw(&mut self) -> usize {
        self.indices.next_index(self.playlist.len()) % self.playlist.len()
    }

    fn selection(&self) -> Selection {
        Selection {
            index: self.index,
            resource: self.resource().to_string(),
        }
    }

    fn resource(&self) -> &str {
        // `index` is always reduced modulo the non-empty playlist length.
        self.playlist.get(self.index).unwrap_or_default()
    }
}

/// Owns the rotation index and the timer that drives it.
pub struct MediaRotator {
    inner: Arc<Shared>,
    timer: Option<Box<dyn TimerHandle>>,
    period: Duration,
}

impl std::fmt::Debug for MediaRotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("MediaRotator")
            .field("index", &inner.index)
            .field("len", &inner.playlist.len())
            .field("period", &self.period)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl MediaRotator {
    /// Start rotating `playlist` every [`DEFAULT_ROTATION_PERIOD`] with
    /// entropy-seeded randomness.
    pub fn initialize<I, S>(
        playlist: I,
        scheduler: &dyn IntervalScheduler,
    ) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::initialize_with(playlist, scheduler, RotationOptions::default())
    }

    /// Pick a random starting entry and start the rotation timer.
    ///
    /// Fails with `InvalidArgument` for an empty playlist, in which case no
    /// timer is scheduled.
    pub fn initialize_with<I, S>(
        playlist: I,
        scheduler: &dyn IntervalScheduler,
        options: RotationOptions,
    ) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let playlist = Playlist::new(playlist)?;
        let mut inner = RotatorInner {
            playlist,
            index: 0,
            indices: options.indices,
            listeners: Listeners::default(),
            disposed: false,
        };
        inner.index = inner.draw();
        tracing::info!(
            index = inner.index,
            len = inner.playlist.len(),
            period = ?options.period,
            "media rotator initialized"
        );

        let inner = Arc::new(Shared {
            state: Mutex::new(inner),
            delivery: Delivery::default(),
        });
        let weak = Arc::downgrade(&inner);
        let timer = scheduler.schedule(
            options.period,
            Arc::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if rotate(&inner, Trigger::Timer).is_err() {
                    tracing::trace!("rotation tick ignored after dispose");
                }
            }),
        );

        Ok(Self {
            inner,
            timer: Some(timer),
            period: options.period,
        })
    }

    /// Identifier of the selected resource.
    pub fn current_resource(&self) -> Result<String, ControllerError> {
        let inner = lock(&self.inner);
        if inner.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        Ok(inner.resource().to_string())
    }

    /// Index of the selected resource.
    pub fn current_index(&self) -> Result<usize, ControllerError> {
        let inner = lock(&self.inner);
        if inner.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        Ok(inner.index)
    }

    /// The presentation layer finished playing the selected resource.
    pub fn on_resource_ended(&self) -> Result<Selection, ControllerError> {
        rotate(&self.inner, Trigger::Ended)
    }

    /// Register a listener called with each new selection.
    pub fn subscribe<F>(&self, listener: F) -> Result<ListenerId, ControllerError>
    where
        F: Fn(&Selection) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        Ok(inner.listeners.add(Arc::new(listener)))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<bool, ControllerError> {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        Ok(inner.listeners.remove(id))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Cancel the rotation timer and drop all listeners.
    ///
    /// Blocks until a rotation already notifying listeners on another thread
    /// has finished, so once this returns no listener is called again. A tick
    /// racing this call is discarded. Calling it again is a no-op; every
    /// other operation fails with `InvalidState`.
    pub fn dispose(&mut self) {
        {
            let mut inner = lock(&self.inner);
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.listeners.clear();
        }
        self.inner.delivery.close();
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        tracing::debug!("media rotator disposed");
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.inner).disposed
    }
}

impl Drop for MediaRotator {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn rotate(shared: &Shared, trigger: Trigger) -> Result<Selection, ControllerError> {
    let (selection, snapshot, delivery) = {
        let mut guard = lock(shared);
        if guard.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        let delivery = shared
            .delivery
            .begin()
            .ok_or(ControllerError::InvalidState(NAME))?;
        guard.index = guard.draw();
        tracing::debug!(?trigger, index = guard.index, "media rotated");
        (guard.selection(), guard.listeners.snapshot(), delivery)
    };
    delivery.notify(&snapshot, &selection);
    Ok(selection)
}

fn lock(shared: &Shared) -> MutexGuard<'_, RotatorInner> {
    shared
        .state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
