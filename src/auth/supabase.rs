// ABOUTME: Supabase GoTrue identity provider for email/password accounts
// ABOUTME: Handles sign-up with optional email confirmation, password grants, refresh and logout

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::provider::{auth_failure, expiry_from_now, IdentityProvider, SignUpOutcome};
use crate::config::SupabaseConfig;
use crate::constants::{endpoints, service_names::SUPABASE_AUTH};
use crate::errors::{AppError, AppResult};
use crate::models::{AuthUser, Session};
use crate::utils::http_client::{join_url, json_body, send, shared_client};

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: GoTrueUser,
}

impl From<GoTrueSession> for Session {
    fn from(session: GoTrueSession) -> Self {
        Self {
            user: session.user.into(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: expiry_from_now(session.expires_in),
        }
    }
}

/// `/signup` returns a session when auto-confirm is on, otherwise the bare user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

/// Supabase auth client
pub struct SupabaseIdentity {
    auth_url: String,
    anon_key: String,
    http_client: Client,
}

impl SupabaseIdentity {
    /// Create a client for the configured project
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client with a specific HTTP client
    #[must_use]
    pub fn with_http_client(config: &SupabaseConfig, http_client: Client) -> Self {
        Self {
            auth_url: join_url(&config.url, endpoints::SUPABASE_AUTH_PATH),
            anon_key: config.anon_key.clone(),
            http_client,
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(join_url(&self.auth_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn token(&self, grant_type: &str, body: serde_json::Value) -> AppResult<Session> {
        let request = self
            .post("token")
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let response = send(SUPABASE_AUTH, request).await?;
        if !response.status().is_success() {
            return Err(auth_failure(SUPABASE_AUTH, response).await);
        }
        let session: GoTrueSession = json_body(SUPABASE_AUTH, response).await?;
        Ok(session.into())
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    fn name(&self) -> &'static str {
        SUPABASE_AUTH
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        let request = self
            .post("signup")
            .json(&json!({ "email": email, "password": password }));
        let response = send(SUPABASE_AUTH, request).await?;
        if !response.status().is_success() {
            return Err(auth_failure(SUPABASE_AUTH, response).await);
        }
        Ok(match json_body(SUPABASE_AUTH, response).await? {
            SignUpResponse::Session(session) => SignUpOutcome::SignedIn(session.into()),
            SignUpResponse::User(user) => SignUpOutcome::ConfirmationPending(user.into()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        self.token("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_out(&self, session: &Session) -> AppResult<()> {
        let request = self.post("logout").bearer_auth(&session.access_token);
        let response = send(SUPABASE_AUTH, request).await?;
        let status = response.status();
        // An already revoked token still ends the local session
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            debug!(%status, "Supabase logout");
            return Ok(());
        }
        Err(auth_failure(SUPABASE_AUTH, response).await)
    }

    async fn refresh(&self, session: &Session) -> AppResult<Session> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or_else(AppError::auth_expired)?;
        self.token("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }
}
