//! Administrative views
//!
//! The server answers 403 for non-admin users; callers are expected to check
//! the admin guard before reaching for these.

use super::Session;
use crate::client::RequestOptions;
use crate::client::error::ClientError;
use crate::types::{AdminOverview, AdminUser, LogTail, OrderFilter, OrderPage, RevokedSession, SessionRecord};
use crate::validation;
use tracing::info;

impl Session {
    pub async fn admin_overview(&self) -> Result<AdminOverview, ClientError> {
        self.fetch_data("/admin/overview", RequestOptions::get())
            .await
    }

    pub async fn admin_users(&self) -> Result<Vec<AdminUser>, ClientError> {
        self.fetch_data("/admin/users", RequestOptions::get()).await
    }

    /// All users' orders; `only_mine` is ignored here
    pub async fn admin_orders(&self, filter: &OrderFilter) -> Result<OrderPage, ClientError> {
        let filter = OrderFilter {
            only_mine: false,
            ..filter.clone()
        };
        let mut options = RequestOptions::get();
        options.query = filter.query_pairs();
        self.fetch_data("/admin/orders", options).await
    }

    pub async fn admin_sessions(&self) -> Result<Vec<SessionRecord>, ClientError> {
        self.fetch_data("/admin/sessions", RequestOptions::get())
            .await
    }

    /// Drop the active session of `username`
    pub async fn revoke_session(&self, username: &str) -> Result<RevokedSession, ClientError> {
        let username = validation::required(username, "username required")?;
        let username = validation::path_segment(username, "username")?;

        let path = format!("/admin/sessions/revoke/{}", urlencoding::encode(username));
        let revoked: RevokedSession = self.fetch_data(&path, RequestOptions::post()).await?;
        info!(username = %revoked.username, "Session revoked");
        Ok(revoked)
    }

    /// Drop every active session, including the caller's own
    pub async fn revoke_all_sessions(&self) -> Result<(), ClientError> {
        self.request("/admin/sessions/revoke-all", RequestOptions::post())
            .await?;
        info!("All sessions revoked");
        Ok(())
    }

    /// Tail of the server log; the server clamps `lines` to 1..=5000
    pub async fn admin_logs(&self, lines: Option<u32>) -> Result<LogTail, ClientError> {
        let mut options = RequestOptions::get();
        if let Some(lines) = lines {
            options = options.query("lines", lines);
        }
        self.fetch_data("/admin/logs", options).await
    }
}
