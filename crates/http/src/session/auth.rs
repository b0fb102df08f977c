//! Login, logout and identity

use super::Session;
use crate::client::RequestOptions;
use crate::client::error::ClientError;
use crate::types::{CurrentUser, HealthStatus, LoginRequest, LoginResponse};
use saleorder_core::AuthGuard;
use tracing::{debug, info, warn};

impl Session {
    /// Exchange credentials for a bearer token and store it
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Username and password required".to_string(),
            ));
        }

        let options = RequestOptions::post()
            .without_auth()
            .json(&LoginRequest { username, password })?;
        let login: LoginResponse = self.fetch_data("/auth/login", options).await?;

        self.tokens().set_token(&login.token);
        info!(username = %login.username, is_admin = login.is_admin, "Logged in");
        Ok(login)
    }

    /// Identity behind the stored token
    pub async fn me(&self) -> Result<CurrentUser, ClientError> {
        self.fetch_data("/auth/me", RequestOptions::get()).await
    }

    /// End the server session and tear down local state
    ///
    /// The token and every pending draft are cleared even when the server
    /// call fails; the failure is still returned.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = if self.tokens().has_token() {
            self.request("/auth/logout", RequestOptions::post())
                .await
                .map(|_| ())
        } else {
            debug!("No stored token, skipping server logout");
            Ok(())
        };

        self.tokens().clear_token();
        if let Err(e) = self.drafts().clear_all() {
            warn!("Failed to clear pending drafts: {e}");
        }
        info!("Logged out");
        result
    }

    /// Resolve the route guard for the current credential
    ///
    /// Without a stored token the user is anonymous and nothing is sent.
    /// Any failure of the identity lookup also resolves to anonymous.
    pub async fn resolve_guard(&self) -> AuthGuard {
        let mut guard = AuthGuard::new();
        let user = if self.tokens().has_token() {
            match self.me().await {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!("Identity lookup failed: {e}");
                    None
                }
            }
        } else {
            None
        };
        guard.resolve(user);
        guard
    }

    /// Service health; needs no credential
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.fetch("/health", RequestOptions::get().without_auth())
            .await
    }
}
