//! Light/dark display preference.
//!
//! The timer core doesn't care about the theme; the front end owns a
//! [`ThemePreference`] and persists it through a [`ThemeStore`] under the
//! fixed key [`THEME_KEY`].

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::storage::Database;

/// Key the preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::Custom(format!(
                "unknown theme '{other}', expected 'light' or 'dark'"
            ))),
        }
    }
}

/// Durable storage for the theme preference.
pub trait ThemeStore {
    fn load_theme(&self) -> Result<Option<Theme>>;
    fn save_theme(&self, theme: Theme) -> Result<()>;
}

impl ThemeStore for Database {
    fn load_theme(&self) -> Result<Option<Theme>> {
        match self.kv_get(THEME_KEY)? {
            None => Ok(None),
            Some(raw) => match raw.parse() {
                Ok(theme) => Ok(Some(theme)),
                Err(e) => {
                    warn!(value = %raw, error = %e, "ignoring stored theme");
                    Ok(None)
                }
            },
        }
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        self.kv_set(THEME_KEY, theme.as_str())?;
        Ok(())
    }
}

/// Process-local store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load_theme(&self) -> Result<Option<Theme>> {
        Ok(*self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(theme);
        Ok(())
    }
}

/// The current theme plus the store it is persisted to.
#[derive(Debug)]
pub struct ThemePreference<T> {
    store: T,
    current: Theme,
}

impl<T: ThemeStore> ThemePreference<T> {
    /// Read the stored theme, defaulting to light.
    pub fn load(store: T) -> Result<Self> {
        let current = store.load_theme()?.unwrap_or_default();
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip light/dark and persist the new value.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set(self.current.toggled())?;
        Ok(self.current)
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.store.save_theme(theme)?;
        self.current = theme;
        Ok(())
    }

    pub fn store(&self) -> &T {
        &self.store
    }
}
