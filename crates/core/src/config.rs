//! Client settings
//!
//! Settings are layered: built-in defaults, then an optional configuration
//! file (TOML or JSON, picked by extension), then `SALEORDER__*` environment
//! variables (`SALEORDER__API__BASE_URL`, `SALEORDER__STORAGE__STATE_DIR`, ...).

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default API base path of the sale-order service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageSettings {
    /// Directory holding the persistent and session stores
    pub state_dir: PathBuf,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 0,
            user_agent: concat!("saleorder-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// `SALEORDER_STATE_DIR`, else the platform data directory
pub fn default_state_dir() -> PathBuf {
    std::env::var("SALEORDER_STATE_DIR").map_or_else(
        |_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("saleorder")
        },
        PathBuf::from,
    )
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default(
                "storage.state_dir",
                defaults.storage.state_dir.to_string_lossy().to_string(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("SALEORDER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Persistent store: token and theme
    pub fn store_path(&self) -> PathBuf {
        self.storage.state_dir.join("store.json")
    }

    /// Session store: workflow drafts, wiped on logout
    pub fn session_path(&self) -> PathBuf {
        self.storage.state_dir.join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.timeout_secs, 0);
        assert!(settings.api.user_agent.starts_with("saleorder-client/"));
        assert!(settings.store_path().ends_with("store.json"));
        assert!(settings.session_path().ends_with("session.json"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saleorder.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://orders.example.com/api/v1\"\ntimeout_secs = 15\n\n[storage]\nstate_dir = \"/tmp/saleorder-test\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.api.base_url, "https://orders.example.com/api/v1");
        assert_eq!(settings.api.timeout_secs, 15);
        assert_eq!(settings.storage.state_dir, PathBuf::from("/tmp/saleorder-test"));
        assert!(settings.api.user_agent.starts_with("saleorder-client/"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
