//! Version and build stamp baked in by `build.rs`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: &str = env!("PANTRY_BUILD_GIT_HASH");
pub const BUILD_TIMESTAMP: &str = env!("PANTRY_BUILD_TIMESTAMP");

/// Appended to `pantry --help`.
pub const HELP_FOOTER: &str = concat!(
    "Build: ",
    env!("PANTRY_BUILD_GIT_HASH"),
    " (",
    env!("PANTRY_BUILD_TIMESTAMP"),
    ")"
);

/// One-line stamp printed when `pantry run` starts.
pub fn banner() -> String {
    format!("pantry v{VERSION} [{GIT_COMMIT}]")
}

/// Text for `pantry --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("PANTRY_BUILD_GIT_HASH"),
    ", built ",
    env!("PANTRY_BUILD_TIMESTAMP"),
    ")"
);
