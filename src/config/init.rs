//! Config-path helpers and `pantry init`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;

use super::defaults::DEFAULT_PANTRY_CONFIG_TEMPLATE;
use super::GlobalConfigInitResult;

/// Return the default per-user config path (`~/.config/pantry/pantry.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("pantry").join("pantry.toml"))
}

/// Write the default template to `~/.config/pantry/pantry.toml`.
///
/// Without `force` an existing file is left alone. With `force` the existing
/// file is copied to a timestamped backup first.
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("unable to resolve a config directory for pantry.toml".to_string())
    })?;
    initialize_config_at_path(&path, force)
}

pub(super) fn initialize_config_at_path(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if path.exists() {
        if !force {
            return Ok(GlobalConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            });
        }
        let backup_path = backup_path_for(path);
        std::fs::copy(path, &backup_path)?;
        std::fs::write(path, DEFAULT_PANTRY_CONFIG_TEMPLATE)?;
        return Ok(GlobalConfigInitResult::Overwritten {
            path: path.to_path_buf(),
            backup_path,
        });
    }

    // create_new: another process may have created the file since the check.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_PANTRY_CONFIG_TEMPLATE.as_bytes())?;
            Ok(GlobalConfigInitResult::Created {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(GlobalConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pantry.toml".to_string());
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    (0..100usize)
        .map(|n| {
            if n == 0 {
                path.with_file_name(format!("{file_name}.{timestamp}.bak"))
            } else {
                path.with_file_name(format!("{file_name}.{timestamp}.{n}.bak"))
            }
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| {
            path.with_file_name(format!("{file_name}.{timestamp}.{}.bak", std::process::id()))
        })
}

/// Base config directory: `$XDG_CONFIG_HOME`, then `~/.config`, then the
/// platform config dir.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}
