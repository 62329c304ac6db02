//! Host-environment boundary consumed by the controllers.
//!
//! The host supplies two primitives:
//! - an appearance signal (`AppearanceSource`): a synchronous query for the
//!   system light/dark preference plus a change subscription
//! - a recurring timer (`IntervalScheduler`)
//!
//! Both return handles whose release is the only cancellation primitive.
//! Handles also release themselves on drop.

use std::time::Duration;

use crate::observe::Listener;

mod manual;
mod timer;

pub use manual::{ManualAppearance, ManualScheduler};
pub use timer::TokioScheduler;

/// Host-reported system appearance preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Appearance {
    Light,
    Dark,
    /// The host could not (or did not) report a preference.
    #[default]
    Unspecified,
}

impl Appearance {
    /// Lenient parse: `dark`/`light` in any case, everything else unspecified.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            "light" => Self::Light,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Unspecified => "unspecified",
        }
    }
}

/// Callback invoked by the host whenever the appearance changes.
pub type AppearanceCallback = Listener<Appearance>;

/// Live registration on the host's appearance-change channel.
pub trait AppearanceSubscription: Send {
    /// Unsubscribe. Calling more than once is a no-op.
    fn remove(&mut self);
}

/// Host appearance signal.
pub trait AppearanceSource: Send + Sync {
    /// Current system appearance. Hosts without an appearance API report
    /// [`Appearance::Unspecified`].
    fn current_appearance(&self) -> Appearance;

    /// Register `callback` for future appearance changes.
    fn subscribe(&self, callback: AppearanceCallback) -> Box<dyn AppearanceSubscription>;
}

/// Callback invoked on each timer tick.
pub type TickCallback = std::sync::Arc<dyn Fn() + Send + Sync>;

/// Live recurring timer registration.
pub trait TimerHandle: Send {
    /// Stop the timer. Calling more than once is a no-op.
    fn cancel(&mut self);
}

/// Host recurring-interval primitive.
pub trait IntervalScheduler: Send + Sync {
    /// Invoke `tick` every `period`, starting one period from now.
    fn schedule(&self, period: Duration, tick: TickCallback) -> Box<dyn TimerHandle>;
}
