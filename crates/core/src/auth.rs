//! Bearer token store

use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "sale_order_token";

/// Holder of the bearer credential
///
/// The token is opaque: it is written after login, read for every
/// authenticated request and removed on logout or when the server rejects
/// it. Expiry is never tracked here; the server reports it with a 401.
///
/// None of the operations fail. Storage errors are logged and treated as an
/// absent token.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token, or an empty string
    pub fn get_token(&self) -> String {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read token: {e}");
                String::new()
            }
        }
    }

    /// Persist `token`; an empty token leaves the store untouched
    pub fn set_token(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        if let Err(e) = self.store.set(TOKEN_KEY, token) {
            warn!("Failed to persist token: {e}");
        }
    }

    /// Remove the stored token
    pub fn clear_token(&self) {
        match self.store.remove(TOKEN_KEY) {
            Ok(()) => debug!("Token cleared"),
            Err(e) => warn!("Failed to clear token: {e}"),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.get_token().is_empty()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}
