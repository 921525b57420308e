// ABOUTME: Session and identity models owned by the auth session adapter
// ABOUTME: The rest of the client only reads sessions and reacts to transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in user identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-issued user id
    pub id: String,
    /// Email address, when the provider returned one
    #[serde(default)]
    pub email: Option<String>,
}

/// An active session with the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user
    pub user: AuthUser,
    /// Bearer token for backend calls
    pub access_token: String,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// User id shortcut
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Email or a fallback label
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.email.as_deref().unwrap_or(&self.user.id)
    }

    /// Whether the access token expires within `leeway` of `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - leeway <= now)
    }
}

/// Which capability the configured auth adapter offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// No accounts; favorites are always local and ratings are unavailable
    Anonymous,
    /// Accounts backed by an identity provider
    ProviderBacked,
}
