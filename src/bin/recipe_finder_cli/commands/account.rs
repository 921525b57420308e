// ABOUTME: Account commands for recipe-finder
// ABOUTME: Sign-up, sign-in, sign-out and status against the configured identity provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{auth::AuthSessionAdapter, context::ServiceContext, errors::AppResult};
use tracing::info;

use crate::helpers::display::{display_sign_in, display_sign_up, display_status};

type Result<T> = AppResult<T>;

/// Create an account
pub async fn sign_up(services: &ServiceContext, email: &str, password: &str) -> Result<()> {
    let auth = services.auth();
    let user = auth.sign_up(email, password).await?;
    display_sign_up(&user, auth.current().is_some());
    Ok(())
}

/// Sign in; the session is persisted for later commands
pub async fn sign_in(services: &ServiceContext, email: &str, password: &str) -> Result<()> {
    let user = services.auth().sign_in(email, password).await?;
    display_sign_in(&user);
    Ok(())
}

/// Sign out
pub async fn sign_out(services: &ServiceContext) -> Result<()> {
    services.auth().sign_out().await?;
    info!("Signed out");
    println!("Signed out");
    Ok(())
}

/// Print the session state
pub fn status(services: &ServiceContext) {
    let auth = services.auth();
    display_status(auth.mode(), auth.current().as_ref());
}
