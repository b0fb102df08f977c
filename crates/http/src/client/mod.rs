//! Transport client for the sale-order API
//!
//! [`ApiClient`] turns a path and [`RequestOptions`] into an HTTP request and
//! normalizes the response: successful bodies come back as parsed JSON (or
//! raw bytes for downloads) and everything else becomes a [`ClientError`].
//! It never touches stored credentials itself; the caller hands it the token
//! and reacts to [`ClientError::Unauthorized`].

pub mod error;

use bytes::Bytes;
use error::ClientError;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// Options for a single request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Attach the bearer token when one is stored
    pub auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
            auth: true,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().method(Method::POST)
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Serialize `body` as the JSON request body
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Send without the bearer token
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.auth = false;
        self
    }
}

/// Sale-order API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(extra: HeaderMap, auth_token: Option<&str>) -> Result<HeaderMap, ClientError> {
        let mut headers = extra;
        if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::Configuration("stored token is not a valid header value".into())
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Send a JSON request and return the parsed response body
    ///
    /// `auth_token` is attached only when `options.auth` is set and the token
    /// is non-empty. `Content-Type: application/json` is sent unless
    /// `options.headers` overrides it.
    pub async fn execute(
        &self,
        path: &str,
        options: RequestOptions,
        auth_token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let RequestOptions {
            method,
            body,
            headers: extra,
            query,
            auth,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.extend(extra);
        let headers = Self::headers(headers, auth_token.filter(|_| auth))?;

        debug!(%method, path, "Sending request");
        let mut request = self.client.request(method, self.url(path)).headers(headers);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        finish_json(request.send().await?).await
    }

    /// Upload a multipart form; the transport sets the content type
    pub async fn execute_multipart(
        &self,
        path: &str,
        form: Form,
        auth_token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let headers = Self::headers(HeaderMap::new(), auth_token)?;

        debug!(path, "Sending multipart upload");
        let response = self
            .client
            .post(self.url(path))
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        finish_json(response).await
    }

    /// Fetch a binary payload
    ///
    /// Failures still decode the JSON error body for the message.
    pub async fn download(&self, path: &str, auth_token: Option<&str>) -> Result<Bytes, ClientError> {
        let headers = Self::headers(HeaderMap::new(), auth_token)?;

        debug!(path, "Downloading");
        let response = self.client.get(self.url(path)).headers(headers).send().await?;
        let (status, bytes) = read_body(response).await?;
        debug!(path, status = status.as_u16(), bytes = bytes.len(), "Download finished");

        if status.is_success() {
            Ok(bytes)
        } else {
            Err(ClientError::from_response(status, &parse_body(&bytes)))
        }
    }
}

/// Read the whole body; a broken body on an error response reads as empty so
/// the status is still reported
async fn read_body(response: Response) -> Result<(StatusCode, Bytes), ClientError> {
    let status = response.status();
    match response.bytes().await {
        Ok(bytes) => Ok((status, bytes)),
        Err(_) if !status.is_success() => Ok((status, Bytes::new())),
        Err(e) => Err(e.into()),
    }
}

/// Parse a response body as JSON, treating anything unparsable as `{}`
pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}

async fn finish_json(response: Response) -> Result<Value, ClientError> {
    let (status, bytes) = read_body(response).await?;
    debug!(status = status.as_u16(), "Response received");

    let body = parse_body(&bytes);
    if status.is_success() {
        Ok(body)
    } else {
        Err(ClientError::from_response(status, &body))
    }
}

/// Builder for `ApiClient`
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout; zero disables it
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url '{base_url}': {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new().user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("saleorder-client/", env!("CARGO_PKG_VERSION")).into()),
        );
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(ApiClient {
            client: client_builder.build()?,
            base_url,
        })
    }
}
