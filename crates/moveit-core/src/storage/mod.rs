mod config;
mod cookies;

pub use config::{CatalogConfig, Config, CycleConfig, NotificationsConfig};
pub use cookies::{
    CookieJar, FileCookieJar, MemoryCookieJar, ProfileCookies, COMPLETED_COOKIE,
    EXPERIENCE_COOKIE, LEVEL_COOKIE,
};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/moveit[-dev]/` based on MOVEIT_ENV.
///
/// Set MOVEIT_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOVEIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("moveit-dev")
    } else {
        base_dir.join("moveit")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
