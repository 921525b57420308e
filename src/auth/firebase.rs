// ABOUTME: Firebase identity provider using the Identity Toolkit REST API
// ABOUTME: Email/password sign-up and sign-in, plus Secure Token refresh; sign-out is local only

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Firebase Authentication
//!
//! Firebase ID tokens are stateless JWTs, so there is no remote revocation on
//! sign-out; the adapter simply forgets the session. Provider error codes such
//! as `EMAIL_EXISTS` or `INVALID_LOGIN_CREDENTIALS` are surfaced verbatim.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{auth_failure, expiry_from_now, IdentityProvider, SignUpOutcome};
use crate::config::FirebaseConfig;
use crate::constants::service_names::FIREBASE_AUTH;
use crate::errors::{AppError, AppResult};
use crate::models::{AuthUser, Session};
use crate::utils::http_client::{json_body, send, shared_client};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds, sent as a string
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    user_id: String,
}

fn parse_expires_in(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.parse().ok())
}

impl From<PasswordResponse> for Session {
    fn from(response: PasswordResponse) -> Self {
        Self {
            user: AuthUser {
                id: response.local_id,
                email: response.email,
            },
            access_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: expiry_from_now(parse_expires_in(response.expires_in.as_deref())),
        }
    }
}

/// Firebase auth client
pub struct FirebaseIdentity {
    api_key: String,
    identity_url: String,
    token_url: String,
    http_client: Client,
}

impl FirebaseIdentity {
    /// Create a client for the configured project
    #[must_use]
    pub fn new(config: &FirebaseConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client with a specific HTTP client
    #[must_use]
    pub fn with_http_client(config: &FirebaseConfig, http_client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            identity_url: config.identity_url.trim_end_matches('/').to_owned(),
            token_url: config.token_url.trim_end_matches('/').to_owned(),
            http_client,
        }
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> AppResult<Session> {
        let url = format!("{}/accounts:{method}", self.identity_url);
        let request = self
            .http_client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            });
        let response = send(FIREBASE_AUTH, request).await?;
        if !response.status().is_success() {
            return Err(auth_failure(FIREBASE_AUTH, response).await);
        }
        let body: PasswordResponse = json_body(FIREBASE_AUTH, response).await?;
        debug!(method, user_id = %body.local_id, "Firebase password call succeeded");
        Ok(body.into())
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    fn name(&self) -> &'static str {
        FIREBASE_AUTH
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        self.password_call("signUp", email, password)
            .await
            .map(SignUpOutcome::SignedIn)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        self.password_call("signInWithPassword", email, password)
            .await
    }

    async fn sign_out(&self, _session: &Session) -> AppResult<()> {
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> AppResult<Session> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or_else(AppError::auth_expired)?;
        let request = self
            .http_client
            .post(format!("{}/token", self.token_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            });
        let response = send(FIREBASE_AUTH, request).await?;
        if !response.status().is_success() {
            return Err(auth_failure(FIREBASE_AUTH, response).await);
        }
        let body: RefreshResponse = json_body(FIREBASE_AUTH, response).await?;
        Ok(Session {
            user: AuthUser {
                id: body.user_id,
                email: session.user.email.clone(),
            },
            access_token: body.id_token,
            refresh_token: Some(body.refresh_token),
            expires_at: expiry_from_now(parse_expires_in(body.expires_in.as_deref())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_response_maps_to_session() {
        let body: PasswordResponse = serde_json::from_str(
            r#"{"idToken":"id","refreshToken":"rt","expiresIn":"3600","localId":"uid","email":"a@b.test"}"#,
        )
        .unwrap();
        let session: Session = body.into();
        assert_eq!(session.user_id(), "uid");
        assert_eq!(session.access_token, "id");
        assert!(session.expires_at.is_some());
    }

    #[test]
    fn test_unparseable_expiry_is_ignored() {
        assert_eq!(parse_expires_in(Some("soon")), None);
        assert_eq!(parse_expires_in(Some("60")), Some(60));
    }
}
