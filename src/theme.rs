// ABOUTME: Theme preference persisted in local storage
// ABOUTME: Falls back to the platform color-scheme hint when nothing is stored

use std::env;

use tracing::{debug, warn};

use crate::constants::storage_keys;
use crate::errors::{AppResult, ErrorCode};
use crate::models::Theme;
use crate::storage::{read_json, write_json, SharedStore};

/// Stored `"dark"|"light"` preference
#[derive(Clone)]
pub struct ThemeStore {
    store: SharedStore,
    platform_default: Theme,
}

impl ThemeStore {
    /// Create a store; `platform_default` is used while nothing is stored
    #[must_use]
    pub fn new(store: SharedStore, platform_default: Theme) -> Self {
        Self {
            store,
            platform_default,
        }
    }

    /// Stored theme, or the platform default when absent or unreadable
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium fails
    pub fn current(&self) -> AppResult<Theme> {
        match read_json::<Theme>(self.store.as_ref(), storage_keys::THEME) {
            Ok(stored) => Ok(stored.unwrap_or(self.platform_default)),
            Err(e) if e.code == ErrorCode::SerializationError => {
                warn!(error = %e, "Ignoring unreadable stored theme");
                Ok(self.platform_default)
            }
            Err(e) => Err(e),
        }
    }

    /// Persist a theme
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium fails
    pub fn set(&self, theme: Theme) -> AppResult<()> {
        write_json(self.store.as_ref(), storage_keys::THEME, &theme)?;
        debug!(%theme, "Theme saved");
        Ok(())
    }

    /// Flip and persist; returns the new theme
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium fails
    pub fn toggle(&self) -> AppResult<Theme> {
        let next = self.current()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}

/// Platform color-scheme preference
///
/// Terminals export `COLORFGBG` as `"<fg>;<bg>"`; background colors 0-6 and 8
/// are dark.
#[must_use]
pub fn detect_platform_theme() -> Theme {
    env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
        .unwrap_or_default()
}

fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if background <= 6 || background == 8 {
        Theme::Dark
    } else {
        Theme::Light
    })
}
