//! Client session state
//!
//! One explicit session object with a single writer (the auth-state-change
//! listener) and many readers. Feature code never mutates the session
//! directly; it goes through [`Session::set_user`] / [`Session::clear`] /
//! [`Session::update_record`].

use parking_lot::RwLock;
use shared::models::User;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Shared session cell
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the signed-in principal (auth listener only)
    pub fn set_user(&self, user: User, token: impl Into<String>) {
        let mut state = self.inner.write();
        state.token = Some(token.into());
        state.user = Some(user);
    }

    /// Refresh the cached user record without touching the token
    pub fn update_record(&self, user: User) {
        let mut state = self.inner.write();
        state.user = Some(user);
    }

    /// Sign out
    pub fn clear(&self) {
        let mut state = self.inner.write();
        state.token = None;
        state.user = None;
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    /// Current user record snapshot
    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    /// Stable identity (email) of the signed-in principal
    pub fn identity(&self) -> Option<String> {
        self.inner.read().user.as_ref().map(|u| u.email.clone())
    }

    /// Whether a principal is signed in
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            email: email.to_string(),
            name: "Test".to_string(),
            photo_url: None,
            phone: None,
            role: Some("citizen".to_string()),
            department: None,
            is_premium: false,
            is_blocked: false,
            issues_reported: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());

        session.set_user(user("alice@x.com"), "token-1");
        assert!(session.is_authenticated());
        assert_eq!(session.identity().as_deref(), Some("alice@x.com"));
        assert_eq!(session.token().as_deref(), Some("token-1"));

        // Readers see record refreshes, token untouched
        let mut refreshed = user("alice@x.com");
        refreshed.is_premium = true;
        session.update_record(refreshed);
        assert!(session.user().unwrap().is_premium);
        assert_eq!(session.token().as_deref(), Some("token-1"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
