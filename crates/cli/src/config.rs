//! Settings and local state for a CLI run

use anyhow::{Context, Result};
use saleorder_core::{DraftStore, FileStore, KeyValueStore, Settings, ThemePreference, TokenStore};
use saleorder_http::{ApiClient, Session};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Load settings and apply command-line overrides on top
pub fn load_settings(
    config_file: Option<&Path>,
    base_url: Option<String>,
    state_dir: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_file).with_context(|| match config_file {
        Some(path) => format!("Failed to load settings from {}", path.display()),
        None => "Failed to load settings".to_string(),
    })?;

    if let Some(base_url) = base_url {
        settings.api.base_url = base_url;
    }
    if let Some(state_dir) = state_dir {
        settings.storage.state_dir = state_dir;
    }
    Ok(settings)
}

/// Everything a command needs
pub struct AppContext {
    pub settings: Settings,
    pub session: Session,
    pub theme: ThemePreference,
}

impl AppContext {
    /// Open the stores under the state directory and build the API session
    ///
    /// Token and theme share `store.json`; drafts go to `session.json`.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = ApiClient::builder()
            .base_url(settings.api.base_url.clone())
            .timeout(Duration::from_secs(settings.api.timeout_secs))
            .user_agent(settings.api.user_agent.clone())
            .build()?;

        let persistent: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(settings.store_path()));
        let ephemeral: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(settings.session_path()));

        let session = Session::new(
            client,
            TokenStore::new(Arc::clone(&persistent)),
            DraftStore::new(ephemeral),
        );

        Ok(Self {
            settings,
            session,
            theme: ThemePreference::new(persistent),
        })
    }
}
