//! Light/dark preference

use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Persisted theme choice
#[derive(Clone)]
pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
}

impl ThemePreference {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved theme; unreadable or missing values fall back to light
    pub fn get(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {e}");
                Theme::default()
            }
        }
    }

    pub fn set(&self, theme: Theme) -> crate::Result<()> {
        self.store.set(THEME_KEY, &serde_json::to_string(&theme)?)
    }

    /// Flip the saved theme and return the new value
    pub fn toggle(&self) -> crate::Result<Theme> {
        let theme = self.get().toggle();
        self.set(theme)?;
        Ok(theme)
    }
}
