//! Authenticated session over the transport client
//!
//! [`Session`] owns the credential side of every call: it reads the token
//! from the [`TokenStore`], hands it to the [`ApiClient`] and, when the
//! server answers 401, clears the store before passing the error on. The
//! endpoint methods in the submodules all go through it.

mod admin;
mod auth;
mod dashboard;
mod orders;
mod reports;

use crate::client::error::ClientError;
use crate::client::{ApiClient, RequestOptions};
use crate::types::ApiResponse;
use bytes::Bytes;
use reqwest::multipart::Form;
use saleorder_core::{DraftStore, TokenStore};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Session {
    client: ApiClient,
    tokens: TokenStore,
    drafts: DraftStore,
}

impl Session {
    pub const fn new(client: ApiClient, tokens: TokenStore, drafts: DraftStore) -> Self {
        Self {
            client,
            tokens,
            drafts,
        }
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub const fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    fn token(&self) -> Option<String> {
        Some(self.tokens.get_token()).filter(|t| !t.is_empty())
    }

    /// Clear the credential when the server rejected it
    fn observe<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(error) = &result {
            if error.is_unauthorized() {
                warn!("Server rejected the credential, clearing stored token: {error}");
                self.tokens.clear_token();
            }
        }
        result
    }

    /// Send a JSON request and return the parsed body unmodified
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let token = if options.auth { self.token() } else { None };
        let result = self.client.execute(path, options, token.as_deref()).await;
        self.observe(result)
    }

    /// Send a multipart form with the bearer token attached
    pub async fn upload_form(&self, path: &str, form: Form) -> Result<Value, ClientError> {
        let token = self.token();
        let result = self
            .client
            .execute_multipart(path, form, token.as_deref())
            .await;
        self.observe(result)
    }

    /// Download a binary payload with the bearer token attached
    pub async fn download(&self, path: &str) -> Result<Bytes, ClientError> {
        let token = self.token();
        let result = self.client.download(path, token.as_deref()).await;
        self.observe(result)
    }

    /// Decode a whole response body
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let body = self.request(path, options).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Decode the `data` member of a `{success, data}` envelope
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let envelope: ApiResponse<T> = self.fetch(path, options).await?;
        Ok(envelope.data)
    }
}
