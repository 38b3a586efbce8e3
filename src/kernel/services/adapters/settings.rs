use std::path::{Path, PathBuf};

use crate::kernel::services::adapters::paths::{create_dir_if_missing, get_config_dir};
use crate::kernel::services::ports::WorkspaceConfig;

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Writes a settings file holding the defaults if none exists yet.
pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        create_dir_if_missing(parent)?;
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&WorkspaceConfig::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_config() -> WorkspaceConfig {
    match get_settings_path() {
        Some(path) => load_config_from(&path),
        None => WorkspaceConfig::default(),
    }
}

/// A missing file yields the defaults silently; an unreadable or malformed
/// one yields the defaults with a warning.
pub fn load_config_from(path: &Path) -> WorkspaceConfig {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return WorkspaceConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings");
            return WorkspaceConfig::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
            WorkspaceConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
