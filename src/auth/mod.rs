// ABOUTME: Auth session adapter seam with anonymous and provider-backed implementations
// ABOUTME: Owns the current session and notifies subscribers on sign-in, sign-up and sign-out

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Authentication
//!
//! The rest of the client never talks to an identity provider directly. It
//! reads [`AuthSessionAdapter::current`] and reacts to transitions delivered
//! through [`AuthSessionAdapter::subscribe`]. Two variants exist:
//!
//! - [`AnonymousAuth`]: no accounts, never a session
//! - [`ProviderBackedAuth`]: email/password accounts through an
//!   [`IdentityProvider`] ([`SupabaseIdentity`] or [`FirebaseIdentity`])

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::models::{AuthMode, AuthUser, Session};

/// No-provider adapter
pub mod anonymous;
/// Firebase Identity Toolkit provider
pub mod firebase;
/// Generic provider-backed adapter
pub mod provider;
/// Session state and subscriptions
pub mod session_hub;
/// Supabase `GoTrue` provider
pub mod supabase;

pub use anonymous::AnonymousAuth;
pub use firebase::FirebaseIdentity;
pub use provider::{IdentityProvider, ProviderBackedAuth, SignUpOutcome};
pub use session_hub::{SessionCallback, SessionHub, Subscription};
pub use supabase::SupabaseIdentity;

/// Session owner consumed by the view controller and the CLI
#[async_trait]
pub trait AuthSessionAdapter: Send + Sync {
    /// Which variant this is
    fn mode(&self) -> AuthMode;

    /// Create an account
    ///
    /// Returns the new user. When the provider requires confirmation no
    /// session is started and no subscriber is notified.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// Sign in with email and password; notifies subscribers on success
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// End the current session; notifies subscribers with `None`
    async fn sign_out(&self) -> AppResult<()>;

    /// Register for session transitions until the handle is dropped
    fn subscribe(&self, on_change: SessionCallback) -> Subscription;

    /// Current session, if any
    fn current(&self) -> Option<Session>;

    /// Load a persisted session at startup
    async fn restore(&self) -> AppResult<Option<Session>> {
        Ok(self.current())
    }
}

/// Reject blank credentials before any network call
///
/// # Errors
///
/// Returns `InvalidInput` when either field is blank
pub fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::invalid_input("Email is required"));
    }
    if password.is_empty() {
        return Err(AppError::invalid_input("Password is required"));
    }
    Ok(())
}
