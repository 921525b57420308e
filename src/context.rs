// ABOUTME: Service wiring from configuration into shared handles for the controller and CLI
// ABOUTME: Chooses the auth adapter and rating backend for the configured identity provider

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{
    AnonymousAuth, AuthSessionAdapter, FirebaseIdentity, ProviderBackedAuth, SupabaseIdentity,
};
use crate::config::{AppConfig, AuthConfig};
use crate::errors::AppResult;
use crate::external::{MealDbClient, RecipeSource};
use crate::favorites::FavoritesStore;
use crate::ratings::{LocalRatingStore, RatingClient, RatingStore, SupabaseRatingStore};
use crate::storage::{FileStore, SharedStore};
use crate::theme::{detect_platform_theme, ThemeStore};
use crate::utils::http_client::create_client_with_timeout;
use crate::view::{ViewController, ViewSettings};

/// Every long-lived service the client needs
#[derive(Clone)]
pub struct ServiceContext {
    recipes: Arc<dyn RecipeSource>,
    auth: Arc<dyn AuthSessionAdapter>,
    favorites: FavoritesStore,
    ratings: RatingClient,
    theme: ThemeStore,
    settings: ViewSettings,
}

impl ServiceContext {
    /// Build services from configuration and restore any persisted session
    ///
    /// # Errors
    ///
    /// Returns a storage error if the data directory cannot be created
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store: SharedStore = Arc::new(FileStore::open(&config.data_dir)?);
        let http_client =
            create_client_with_timeout(config.http.timeout_secs, config.http.connect_timeout_secs);

        let recipes: Arc<dyn RecipeSource> = Arc::new(MealDbClient::with_http_client(
            config.recipe_api_base_url.clone(),
            http_client.clone(),
        ));

        let (auth, rating_store): (Arc<dyn AuthSessionAdapter>, Arc<dyn RatingStore>) =
            match &config.auth {
                AuthConfig::Anonymous => (
                    Arc::new(AnonymousAuth::new()),
                    Arc::new(LocalRatingStore::new(Arc::clone(&store))),
                ),
                AuthConfig::Supabase(supabase) => (
                    Arc::new(ProviderBackedAuth::new(
                        SupabaseIdentity::with_http_client(supabase, http_client.clone()),
                        Arc::clone(&store),
                    )),
                    Arc::new(SupabaseRatingStore::with_http_client(supabase, http_client)),
                ),
                AuthConfig::Firebase(firebase) => (
                    Arc::new(ProviderBackedAuth::new(
                        FirebaseIdentity::with_http_client(firebase, http_client),
                        Arc::clone(&store),
                    )),
                    Arc::new(LocalRatingStore::new(Arc::clone(&store))),
                ),
            };

        if let Err(e) = auth.restore().await {
            warn!(error = %e, "Could not restore stored session");
        }

        let theme = ThemeStore::new(
            Arc::clone(&store),
            config.theme_default.unwrap_or_else(detect_platform_theme),
        );

        info!(
            auth_mode = ?auth.mode(),
            signed_in = auth.current().is_some(),
            "Services ready"
        );

        Ok(Self::from_parts(
            recipes,
            auth,
            store,
            RatingClient::new(rating_store),
            theme,
            ViewSettings {
                trending_ids: config.trending_ids.clone(),
                favorites_require_sign_in: config.favorites_require_sign_in,
            },
        ))
    }

    /// Assemble services from already-built parts
    #[must_use]
    pub fn from_parts(
        recipes: Arc<dyn RecipeSource>,
        auth: Arc<dyn AuthSessionAdapter>,
        store: SharedStore,
        ratings: RatingClient,
        theme: ThemeStore,
        settings: ViewSettings,
    ) -> Self {
        Self {
            recipes,
            auth,
            favorites: FavoritesStore::new(store),
            ratings,
            theme,
            settings,
        }
    }

    /// A fresh controller over these services
    #[must_use]
    pub fn controller(&self) -> ViewController {
        ViewController::new(
            Arc::clone(&self.recipes),
            self.favorites.clone(),
            self.ratings.clone(),
            Arc::clone(&self.auth),
            self.settings.clone(),
        )
    }

    /// Recipe source
    #[must_use]
    pub fn recipes(&self) -> &Arc<dyn RecipeSource> {
        &self.recipes
    }

    /// Auth adapter
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthSessionAdapter> {
        &self.auth
    }

    /// Favorites store
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Rating client
    #[must_use]
    pub const fn ratings(&self) -> &RatingClient {
        &self.ratings
    }

    /// Theme store
    #[must_use]
    pub const fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    /// Controller settings
    #[must_use]
    pub const fn settings(&self) -> &ViewSettings {
        &self.settings
    }
}
