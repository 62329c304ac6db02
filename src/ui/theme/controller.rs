//! Theme controller: single source of truth for the active theme.
//!
//! The controller follows the host appearance signal and allows a manual
//! toggle. A toggle sticks until the host reports another appearance change.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{PaletteSet, ThemeMode, ThemeState};
use crate::error::ControllerError;
use crate::host::{Appearance, AppearanceSource, AppearanceSubscription};
use crate::observe::{Delivery, ListenerId, Listeners};

const NAME: &str = "theme controller";

struct ThemeInner {
    state: ThemeState,
    palettes: PaletteSet,
    listeners: Listeners<ThemeState>,
    disposed: bool,
}

struct Shared {
    state: Mutex<ThemeInner>,
    delivery: Delivery,
}

/// Owns the active [`ThemeState`] and publishes every change to subscribers.
pub struct ThemeController {
    inner: Arc<Shared>,
    subscription: Option<Box<dyn AppearanceSubscription>>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ThemeController")
            .field("mode", &inner.state.mode)
            .field("listeners", &inner.listeners.len())
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl ThemeController {
    /// Read the host's appearance, derive the initial theme, and subscribe to
    /// appearance changes.
    ///
    /// An unspecified appearance (including hosts without an appearance API)
    /// starts in light mode.
    pub fn initialize(host: &dyn AppearanceSource, palettes: PaletteSet) -> Self {
        let appearance = host.current_appearance();
        let mode = ThemeMode::from_appearance(appearance);
        let inner = Arc::new(Shared {
            state: Mutex::new(ThemeInner {
                state: ThemeState::new(mode, &palettes),
                palettes,
                listeners: Listeners::default(),
                disposed: false,
            }),
            delivery: Delivery::default(),
        });

        let weak = Arc::downgrade(&inner);
        let subscription = host.subscribe(Arc::new(move |appearance: &Appearance| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if apply(&inner, |_| ThemeMode::from_appearance(*appearance)).is_err() {
                tracing::trace!("appearance change ignored after dispose");
            }
        }));

        tracing::info!(
            appearance = appearance.as_str(),
            mode = mode.as_str(),
            "theme controller initialized"
        );
        Self {
            inner,
            subscription: Some(subscription),
        }
    }

    /// Active theme.
    pub fn current_theme(&self) -> Result<ThemeState, ControllerError> {
        let inner = lock(&self.inner);
        if inner.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        Ok(inner.state)
    }

    /// Recompute the theme for a new host appearance and notify subscribers.
    ///
    /// Subscribers are notified even when the mode does not change.
    pub fn on_appearance_changed(
        &self,
        appearance: Appearance,
    ) -> Result<ThemeState, ControllerError> {
        apply(&self.inner, |_| ThemeMode::from_appearance(appearance))
    }

    /// Flip light/dark regardless of the host preference.
    pub fn toggle_theme(&self) -> Result<ThemeState, ControllerError> {
        apply(&self.inner, ThemeMode::toggle)
    }

    /// Register a listener called with each new theme.
    pub fn subscribe<F>(&self, listener: F) -> Result<ListenerId, ControllerError>
    where
        F: Fn(&ThemeState) + Send + Sync + 'static,
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

    /// Unsubscribe from the host and drop all listeners.
    ///
    /// Waits for an appearance change that is already notifying listeners on
    /// another thread; once this returns no host event reaches the controller
    /// or its listeners. Calling it again is a no-op; every other operation
    /// fails with `InvalidState`.
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
        if let Some(mut subscription) = self.subscription.take() {
            subscription.remove();
        }
        tracing::debug!("theme controller disposed");
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.inner).disposed
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Move to `next(current_mode)` and notify listeners outside the lock.
fn apply(
    shared: &Shared,
    next: impl FnOnce(ThemeMode) -> ThemeMode,
) -> Result<ThemeState, ControllerError> {
    let (state, snapshot, delivery) = {
        let mut guard = lock(shared);
        if guard.disposed {
            return Err(ControllerError::InvalidState(NAME));
        }
        let delivery = shared
            .delivery
            .begin()
            .ok_or(ControllerError::InvalidState(NAME))?;
        let previous = guard.state.mode;
        let mode = next(previous);
        guard.state = ThemeState::new(mode, &guard.palettes);
        tracing::debug!(from = previous.as_str(), to = mode.as_str(), "theme updated");
        (guard.state, guard.listeners.snapshot(), delivery)
    };
    delivery.notify(&snapshot, &state);
    Ok(state)
}

fn lock(shared: &Shared) -> MutexGuard<'_, ThemeInner> {
    shared
        .state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualAppearance;
    use crate::ui::theme::Palette;

    fn controller(initial: Appearance) -> (ManualAppearance, ThemeController) {
        let host = ManualAppearance::new(initial);
        let controller = ThemeController::initialize(&host, PaletteSet::default());
        (host, controller)
    }

    #[test]
    fn initial_theme_follows_host() {
        let (_host, dark) = controller(Appearance::Dark);
        assert_eq!(dark.current_theme().unwrap().mode, ThemeMode::Dark);
        assert_eq!(dark.current_theme().unwrap().palette, Palette::DARK);

        let (_host, unknown) = controller(Appearance::Unspecified);
        assert_eq!(unknown.current_theme().unwrap().mode, ThemeMode::Light);
    }

    #[test]
    fn host_notification_updates_theme_and_listeners() {
        let (host, controller) = controller(Appearance::Light);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller
            .subscribe(move |state: &ThemeState| sink.lock().unwrap().push(state.mode))
            .unwrap();

        host.set(Appearance::Dark);
        host.set(Appearance::Dark);
        host.set(Appearance::Unspecified);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ThemeMode::Dark, ThemeMode::Dark, ThemeMode::Light]
        );
        assert_eq!(controller.current_theme().unwrap().mode, ThemeMode::Light);
    }

    #[test]
    fn toggle_overrides_until_next_host_change() {
        let (host, controller) = controller(Appearance::Dark);
        assert_eq!(controller.toggle_theme().unwrap().mode, ThemeMode::Light);
        assert_eq!(controller.current_theme().unwrap().mode, ThemeMode::Light);

        host.set(Appearance::Dark);
        assert_eq!(controller.current_theme().unwrap().mode, ThemeMode::Dark);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let (_host, controller) = controller(Appearance::Light);
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        let id = controller
            .subscribe(move |_: &ThemeState| *counter.lock().unwrap() += 1)
            .unwrap();
        controller.toggle_theme().unwrap();
        assert!(controller.unsubscribe(id).unwrap());
        controller.toggle_theme().unwrap();
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn dispose_unsubscribes_and_rejects_operations() {
        let (host, mut controller) = controller(Appearance::Light);
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        controller
            .subscribe(move |_: &ThemeState| *counter.lock().unwrap() += 1)
            .unwrap();
        assert_eq!(host.listener_count(), 1);

        controller.dispose();
        controller.dispose();
        assert_eq!(host.listener_count(), 0);
        assert!(controller.is_disposed());

        host.set(Appearance::Dark);
        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(
            controller.current_theme(),
            Err(ControllerError::InvalidState(NAME))
        );
        assert!(controller.toggle_theme().is_err());
        assert!(controller.on_appearance_changed(Appearance::Dark).is_err());
        assert!(controller.subscribe(|_: &ThemeState| {}).is_err());
    }

    #[test]
    fn dispose_waits_for_an_appearance_change_already_notifying() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::mpsc;

        let (host, mut controller) = controller(Appearance::Light);
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);
        controller
            .subscribe(move |_: &ThemeState| {
                entered_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
            })
            .unwrap();
        let disposed = Arc::new(AtomicBool::new(false));
        let late = Arc::new(AtomicBool::new(false));
        let (flag, late_sink) = (Arc::clone(&disposed), Arc::clone(&late));
        controller
            .subscribe(move |_: &ThemeState| {
                if flag.load(Ordering::SeqCst) {
                    late_sink.store(true, Ordering::SeqCst);
                }
            })
            .unwrap();

        std::thread::scope(|scope| {
            let remote = host.clone();
            scope.spawn(move || remote.set(Appearance::Dark));
            entered_rx.recv().unwrap();
            let disposer = scope.spawn(|| {
                controller.dispose();
                disposed.store(true, Ordering::SeqCst);
            });
            std::thread::sleep(std::time::Duration::from_millis(50));
            assert!(
                !disposed.load(Ordering::SeqCst),
                "dispose must wait for the in-flight notification"
            );
            release_tx.send(()).unwrap();
            disposer.join().unwrap();
        });

        assert!(disposed.load(Ordering::SeqCst));
        assert!(!late.load(Ordering::SeqCst), "listener ran after dispose returned");
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn drop_releases_host_subscription() {
        let host = ManualAppearance::new(Appearance::Light);
        {
            let _controller = ThemeController::initialize(&host, PaletteSet::default());
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(host.listener_count(), 0);
    }
}
