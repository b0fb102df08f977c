//! Route guards for authenticated and admin-only views
//!
//! [`AuthGuard`] tracks whether the current user is known. It starts out
//! [`AuthStatus::Unknown`] while the "who am I" lookup is pending and moves
//! exactly once to either [`AuthStatus::Authenticated`] or
//! [`AuthStatus::Anonymous`]. Only a fresh start returns it to `Unknown`.
//!
//! [`AdminGuard`] nests inside it: authenticated users without the admin
//! flag are blocked with [`GuardOutcome::Forbidden`] rather than redirected.

use crate::types::CurrentUser;
use tracing::debug;

/// Where anonymous users are sent
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Authenticated(CurrentUser),
    Anonymous,
}

/// What a guarded view should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<'a> {
    /// Identity lookup still pending
    Loading,
    /// Not signed in
    Redirect(&'static str),
    /// Signed in but lacking the admin flag
    Forbidden,
    Render(&'a CurrentUser),
}

#[derive(Debug, Clone, Default)]
pub struct AuthGuard {
    status: AuthStatus,
}

impl AuthGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn status(&self) -> &AuthStatus {
        &self.status
    }

    /// Record the result of the identity lookup
    ///
    /// Returns `false` when the guard was already resolved; the first
    /// resolution wins.
    pub fn resolve(&mut self, user: Option<CurrentUser>) -> bool {
        if self.status != AuthStatus::Unknown {
            debug!("Auth guard already resolved, ignoring");
            return false;
        }
        self.status = match user {
            Some(user) => AuthStatus::Authenticated(user),
            None => AuthStatus::Anonymous,
        };
        true
    }

    pub const fn user(&self) -> Option<&CurrentUser> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub const fn outcome(&self) -> GuardOutcome<'_> {
        match &self.status {
            AuthStatus::Unknown => GuardOutcome::Loading,
            AuthStatus::Anonymous => GuardOutcome::Redirect(LOGIN_ROUTE),
            AuthStatus::Authenticated(user) => GuardOutcome::Render(user),
        }
    }
}

/// Admin-only guard layered over an [`AuthGuard`]
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard<'a> {
    auth: &'a AuthGuard,
}

impl<'a> AdminGuard<'a> {
    pub const fn new(auth: &'a AuthGuard) -> Self {
        Self { auth }
    }

    pub const fn outcome(&self) -> GuardOutcome<'a> {
        match self.auth.outcome() {
            GuardOutcome::Render(user) if !user.is_admin => GuardOutcome::Forbidden,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> CurrentUser {
        CurrentUser {
            username: "alice".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_unknown_is_loading() {
        let guard = AuthGuard::new();
        assert_eq!(guard.outcome(), GuardOutcome::Loading);
        assert_eq!(AdminGuard::new(&guard).outcome(), GuardOutcome::Loading);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let mut guard = AuthGuard::new();
        assert!(guard.resolve(None));
        assert_eq!(guard.outcome(), GuardOutcome::Redirect(LOGIN_ROUTE));
        assert_eq!(
            AdminGuard::new(&guard).outcome(),
            GuardOutcome::Redirect(LOGIN_ROUTE)
        );
    }

    #[test]
    fn test_authenticated_renders() {
        let mut guard = AuthGuard::new();
        guard.resolve(Some(user(false)));
        assert_eq!(guard.outcome(), GuardOutcome::Render(&user(false)));
        assert_eq!(guard.user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[test]
    fn test_admin_guard_blocks_non_admins() {
        let mut guard = AuthGuard::new();
        guard.resolve(Some(user(false)));
        assert_eq!(AdminGuard::new(&guard).outcome(), GuardOutcome::Forbidden);

        let mut guard = AuthGuard::new();
        guard.resolve(Some(user(true)));
        assert_eq!(
            AdminGuard::new(&guard).outcome(),
            GuardOutcome::Render(&user(true))
        );
    }

    #[test]
    fn test_first_resolution_wins() {
        let mut guard = AuthGuard::new();
        assert!(guard.resolve(None));
        assert!(!guard.resolve(Some(user(true))));
        assert_eq!(guard.status(), &AuthStatus::Anonymous);
    }
}
