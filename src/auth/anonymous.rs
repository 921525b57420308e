// ABOUTME: Auth adapter for running without an identity provider
// ABOUTME: Never holds a session; sign-up and sign-in report that auth is unavailable

use async_trait::async_trait;

use super::session_hub::{SessionCallback, SessionHub, Subscription};
use super::AuthSessionAdapter;
use crate::errors::{AppError, AppResult};
use crate::models::{AuthMode, AuthUser, Session};

/// Adapter used when no provider is configured
#[derive(Default)]
pub struct AnonymousAuth {
    hub: SessionHub,
}

impl AnonymousAuth {
    /// Create the adapter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthSessionAdapter for AnonymousAuth {
    fn mode(&self) -> AuthMode {
        AuthMode::Anonymous
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> AppResult<AuthUser> {
        Err(AppError::auth_unavailable())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> AppResult<AuthUser> {
        Err(AppError::auth_unavailable())
    }

    async fn sign_out(&self) -> AppResult<()> {
        Ok(())
    }

    fn subscribe(&self, on_change: SessionCallback) -> Subscription {
        self.hub.subscribe(on_change)
    }

    fn current(&self) -> Option<Session> {
        None
    }
}
