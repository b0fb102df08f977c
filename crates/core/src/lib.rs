//! Client-side state for the sale-order tracker
//!
//! Everything the client keeps between requests lives here: the bearer
//! token, the theme preference, the upload drafts handed to report
//! generation, the route guards and the settings that wire them together.

pub mod auth;
pub mod config;
pub mod draft;
pub mod error;
pub mod guard;
pub mod storage;
pub mod theme;
pub mod types;

pub use crate::auth::{TOKEN_KEY, TokenStore};
pub use crate::config::Settings;
pub use crate::draft::{DraftStore, WorkflowDraft, WorkflowKind};
pub use crate::error::{Error, Result};
pub use crate::guard::{AdminGuard, AuthGuard, AuthStatus, GuardOutcome, LOGIN_ROUTE};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
pub use crate::theme::{THEME_KEY, Theme, ThemePreference};
pub use crate::types::{CurrentUser, UploadInfo};
