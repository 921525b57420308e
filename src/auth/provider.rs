// ABOUTME: Provider-backed auth adapter over a pluggable IdentityProvider
// ABOUTME: Persists the session locally, restores and refreshes it at startup, and publishes transitions

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Response;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::session_hub::{SessionCallback, SessionHub, Subscription};
use super::{validate_credentials, AuthSessionAdapter};
use crate::constants::{session::EXPIRY_LEEWAY_SECS, storage_keys};
use crate::errors::{AppError, AppResult};
use crate::models::{AuthMode, AuthUser, Session};
use crate::storage::{read_json, write_json, SharedStore};

/// Result of a sign-up call
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account is active and a session was issued
    SignedIn(Session),
    /// The account exists but must be confirmed before sign-in
    ConfirmationPending(AuthUser),
}

/// Remote identity service speaking email/password
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name for logs and error messages
    fn name(&self) -> &'static str;

    /// Create an account
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome>;

    /// Exchange credentials for a session
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Revoke a session remotely
    async fn sign_out(&self, session: &Session) -> AppResult<()>;

    /// Trade the session's refresh token for a new session
    async fn refresh(&self, session: &Session) -> AppResult<Session>;
}

/// Auth adapter for a configured identity provider
pub struct ProviderBackedAuth<P> {
    provider: P,
    hub: SessionHub,
    store: SharedStore,
}

impl<P: IdentityProvider> ProviderBackedAuth<P> {
    /// Create an adapter; call [`AuthSessionAdapter::restore`] to load a persisted session
    #[must_use]
    pub fn new(provider: P, store: SharedStore) -> Self {
        Self {
            provider,
            hub: SessionHub::new(),
            store,
        }
    }

    /// The wrapped provider
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    fn start_session(&self, session: Session) -> AppResult<AuthUser> {
        write_json(self.store.as_ref(), storage_keys::SESSION, &session)?;
        let user = session.user.clone();
        self.hub.publish(Some(session));
        Ok(user)
    }

    fn end_session(&self) -> AppResult<()> {
        self.store.remove(storage_keys::SESSION)?;
        self.hub.publish(None);
        Ok(())
    }
}

#[async_trait]
impl<P: IdentityProvider> AuthSessionAdapter for ProviderBackedAuth<P> {
    fn mode(&self) -> AuthMode {
        AuthMode::ProviderBacked
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        validate_credentials(email, password)?;
        match self.provider.sign_up(email.trim(), password).await? {
            SignUpOutcome::SignedIn(session) => {
                info!(provider = self.provider.name(), user_id = session.user_id(), "Signed up");
                self.start_session(session)
            }
            SignUpOutcome::ConfirmationPending(user) => {
                info!(
                    provider = self.provider.name(),
                    user_id = %user.id,
                    "Signed up, confirmation pending"
                );
                Ok(user)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        validate_credentials(email, password)?;
        let session = self.provider.sign_in(email.trim(), password).await?;
        info!(provider = self.provider.name(), user_id = session.user_id(), "Signed in");
        self.start_session(session)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let Some(session) = self.hub.current() else {
            debug!("Sign-out without a session");
            return Ok(());
        };
        self.provider.sign_out(&session).await?;
        info!(provider = self.provider.name(), user_id = session.user_id(), "Signed out");
        self.end_session()
    }

    fn subscribe(&self, on_change: SessionCallback) -> Subscription {
        self.hub.subscribe(on_change)
    }

    fn current(&self) -> Option<Session> {
        self.hub.current()
    }

    async fn restore(&self) -> AppResult<Option<Session>> {
        let stored: Option<Session> = match read_json(self.store.as_ref(), storage_keys::SESSION) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                self.store.remove(storage_keys::SESSION)?;
                None
            }
        };
        let Some(session) = stored else {
            return Ok(None);
        };

        if !session.is_expired_at(Utc::now(), Duration::seconds(EXPIRY_LEEWAY_SECS)) {
            debug!(user_id = session.user_id(), "Restored stored session");
            self.hub.publish(Some(session.clone()));
            return Ok(Some(session));
        }

        if session.refresh_token.is_some() {
            match self.provider.refresh(&session).await {
                Ok(refreshed) => {
                    info!(user_id = refreshed.user_id(), "Refreshed stored session");
                    self.start_session(refreshed.clone())?;
                    return Ok(Some(refreshed));
                }
                Err(e) => warn!(error = %e, "Session refresh failed"),
            }
        }

        info!(user_id = session.user_id(), "Dropping expired session");
        self.end_session()?;
        Ok(None)
    }
}

/// Absolute expiry from a provider's `expires_in` seconds
#[must_use]
pub fn expiry_from_now(expires_in_secs: Option<i64>) -> Option<chrono::DateTime<Utc>> {
    expires_in_secs.map(|secs| Utc::now() + Duration::seconds(secs))
}

/// Pull the human-readable message out of a provider error body
///
/// Providers disagree on the field: `msg`, `message`, `error_description`,
/// a bare `error` string, or a nested `error.message`.
#[must_use]
pub fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .or_else(|| match value.get("error") {
            Some(Value::String(message)) => Some(message.as_str()),
            Some(nested) => nested.get("message").and_then(Value::as_str),
            None => None,
        })
        .map(ToOwned::to_owned)
}

/// Map a non-2xx auth response to an error carrying the provider's message verbatim
///
/// Client errors become `AuthInvalid`; anything else is a service failure.
pub async fn auth_failure(service: &str, response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = provider_error_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
    debug!(service, %status, "Auth request rejected");
    if status.is_client_error() {
        AppError::auth_invalid(message)
    } else {
        AppError::external_service(service, message)
    }
}
