//! Pantry: theme and background-media controllers for a food companion app,
//! plus best-effort food image and dish suggestion clients.
//!
//! The two controllers sit on a small host boundary ([`host`]) so they can be
//! driven by a real runtime or by hand in tests:
//!
//! ```no_run
//! use pantry::host::{Appearance, ManualAppearance, ManualScheduler};
//! use pantry::media::MediaRotator;
//! use pantry::ui::theme::{PaletteSet, ThemeController};
//!
//! let host = ManualAppearance::new(Appearance::Light);
//! let theme = ThemeController::initialize(&host, PaletteSet::default());
//! theme.subscribe(|state| println!("theme is now {}", state.mode.as_str())).unwrap();
//! host.set(Appearance::Dark);
//!
//! let timers = ManualScheduler::new();
//! let media = MediaRotator::initialize(["a.mp4", "b.mp4"], &timers).unwrap();
//! println!("playing {}", media.current_resource().unwrap());
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod host;
pub mod media;
pub mod observe;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
