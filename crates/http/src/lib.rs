//! Sale-order HTTP client
//!
//! [`client::ApiClient`] is the transport: it builds requests, attaches a
//! bearer token it is handed and turns responses into JSON or a
//! [`ClientError`]. [`session::Session`] layers the credential lifecycle on
//! top and exposes one method per API endpoint.

pub mod client;
pub mod session;
pub mod types;
pub mod validation;

pub use client::error::ClientError;
pub use client::{ApiClient, ApiClientBuilder, RequestOptions};
pub use session::Session;
