//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. `PANTRY_*` environment variables
//! 2. TOML file specified via --config CLI flag
//! 3. ./pantry.toml in the current directory
//! 4. $XDG_CONFIG_HOME/pantry/pantry.toml (or ~/.config/pantry/pantry.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod resolve;
mod sources;
mod types;

pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::load_config;
pub use types::{
    Config, DisplayConfig, FoodConfig, GlobalConfigInitResult, MediaConfig, NetworkConfig,
    SuggestConfig, ThemeConfig,
};
