// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, recipe fixtures, an in-memory identity provider and mock HTTP servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_finder`

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use recipe_finder::{
    auth::{AnonymousAuth, AuthSessionAdapter, IdentityProvider, ProviderBackedAuth, SignUpOutcome},
    context::ServiceContext,
    errors::{AppError, AppResult},
    external::{MockRecipeSource, RecipeSource},
    models::{AuthUser, RecipeDetail, Session, Theme},
    ratings::{LocalRatingStore, RatingClient},
    storage::{MemoryStore, SharedStore},
    theme::ThemeStore,
    view::{ViewController, ViewSettings},
};
use tokio::net::TcpListener;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Serve `router` on an ephemeral local port; returns the base URL
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn arrabiata() -> RecipeDetail {
    let mut recipe = MockRecipeSource::recipe("52771", "Spicy Arrabiata Penne");
    recipe.summary.category = "Vegetarian".to_owned();
    recipe.summary.cuisine = "Italian".to_owned();
    recipe
}

pub fn carbonara() -> RecipeDetail {
    MockRecipeSource::recipe("52982", "Spaghetti Alla Carbonara")
}

pub fn pad_thai() -> RecipeDetail {
    MockRecipeSource::recipe("52772", "Pad Thai")
}

/// Source with a small fixed catalogue
pub fn recipe_source() -> MockRecipeSource {
    MockRecipeSource::new()
        .with_recipe(arrabiata())
        .with_recipe(carbonara())
        .with_recipe(pad_thai())
}

pub fn session(user: &str) -> Session {
    Session {
        user: AuthUser {
            id: user.to_owned(),
            email: Some(format!("{user}@example.test")),
        },
        access_token: format!("{user}-token"),
        refresh_token: Some(format!("{user}-refresh")),
        expires_at: Some(Utc::now() + Duration::hours(1)),
    }
}

/// In-memory identity provider: accounts are `email -> password`
#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, String>>,
    pub require_confirmation: bool,
    pub refresh_fails: bool,
    pub refresh_calls: Mutex<u32>,
}

impl FakeIdentity {
    pub fn with_account(email: &str, password: &str) -> Self {
        let identity = Self::default();
        identity
            .accounts
            .lock()
            .unwrap()
            .insert(email.to_owned(), password.to_owned());
        identity
    }

    fn session_for(email: &str) -> Session {
        let user = email.split('@').next().unwrap_or(email);
        session(user)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AppError::auth_invalid("User already registered"));
        }
        accounts.insert(email.to_owned(), password.to_owned());
        let session = Self::session_for(email);
        Ok(if self.require_confirmation {
            SignUpOutcome::ConfirmationPending(session.user)
        } else {
            SignUpOutcome::SignedIn(session)
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        match self.accounts.lock().unwrap().get(email) {
            Some(stored) if stored == password => Ok(Self::session_for(email)),
            _ => Err(AppError::auth_invalid("Invalid login credentials")),
        }
    }

    async fn sign_out(&self, _session: &Session) -> AppResult<()> {
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> AppResult<Session> {
        *self.refresh_calls.lock().unwrap() += 1;
        if self.refresh_fails {
            return Err(AppError::auth_invalid("Refresh Token Not Found"));
        }
        let mut refreshed = session.clone();
        refreshed.access_token = "refreshed-token".to_owned();
        refreshed.expires_at = Some(Utc::now() + Duration::hours(1));
        Ok(refreshed)
    }
}

pub const COOK_EMAIL: &str = "cook@example.test";
pub const COOK_PASSWORD: &str = "correct horse";

/// Everything a controller test needs, with handles kept for assertions
pub struct Harness {
    pub store: SharedStore,
    pub recipes: Arc<MockRecipeSource>,
    pub auth: Arc<dyn AuthSessionAdapter>,
    pub services: ServiceContext,
}

impl Harness {
    fn build(recipes: MockRecipeSource, auth: Arc<dyn AuthSessionAdapter>, store: SharedStore) -> Self {
        init_test_logging();
        let recipes = Arc::new(recipes);
        let source: Arc<dyn RecipeSource> = recipes.clone();
        let services = ServiceContext::from_parts(
            source,
            Arc::clone(&auth),
            Arc::clone(&store),
            RatingClient::new(Arc::new(LocalRatingStore::new(Arc::clone(&store)))),
            ThemeStore::new(Arc::clone(&store), Theme::Light),
            ViewSettings {
                trending_ids: vec!["52772".to_owned(), "52771".to_owned(), "52982".to_owned()],
                favorites_require_sign_in: true,
            },
        );
        Self {
            store,
            recipes,
            auth,
            services,
        }
    }

    /// Anonymous variant over the default catalogue
    pub fn anonymous() -> Self {
        Self::anonymous_with(recipe_source())
    }

    pub fn anonymous_with(recipes: MockRecipeSource) -> Self {
        Self::build(recipes, Arc::new(AnonymousAuth::new()), Arc::new(MemoryStore::new()))
    }

    /// Provider-backed variant with one known account, signed out
    pub fn provider() -> Self {
        Self::provider_with(recipe_source())
    }

    pub fn provider_with(recipes: MockRecipeSource) -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let auth = ProviderBackedAuth::new(
            FakeIdentity::with_account(COOK_EMAIL, COOK_PASSWORD),
            Arc::clone(&store),
        );
        Self::build(recipes, Arc::new(auth), store)
    }

    pub fn controller(&self) -> ViewController {
        self.services.controller()
    }

    /// Sign in and tell the controller, as the event loop would
    pub async fn sign_in(&self, controller: &mut ViewController) {
        self.auth.sign_in(COOK_EMAIL, COOK_PASSWORD).await.unwrap();
        controller.session_changed(self.auth.current());
    }

    pub async fn sign_out(&self, controller: &mut ViewController) {
        self.auth.sign_out().await.unwrap();
        controller.session_changed(self.auth.current());
    }
}
