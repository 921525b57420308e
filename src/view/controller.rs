// ABOUTME: View controller that owns AppState and applies every UI transition
// ABOUTME: Async work is split into begin/complete pairs so stale completions can be discarded

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{AppState, Content, DetailView, EmptyState, FavoritesButton, ModalState, Screen, View};
use crate::auth::AuthSessionAdapter;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::external::RecipeSource;
use crate::favorites::FavoritesStore;
use crate::models::{AuthMode, RatingValue, RecipeSummary, Session};
use crate::ratings::RatingClient;

const FAVORITES_LABEL: &str = "Favorites";
const TRENDING_LABEL: &str = "Trending";
const BACK_LABEL: &str = "Back to Search";

/// Controller settings taken from configuration
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Recipe ids loaded by the trending view
    pub trending_ids: Vec<String>,
    /// Whether favorites need a session in provider-backed mode
    pub favorites_require_sign_in: bool,
}

/// An issued search; pass it back to [`ViewController::complete_search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Monotonic request id
    pub request_id: u64,
    /// Trimmed query
    pub query: String,
}

/// An issued trending load; pass it back to [`ViewController::complete_trending`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingTicket {
    /// Monotonic request id
    pub request_id: u64,
    /// Ids to load, in display order
    pub ids: Vec<String>,
}

/// Single owner of UI state
pub struct ViewController {
    state: AppState,
    session: Option<Session>,
    recipes: Arc<dyn RecipeSource>,
    favorites: FavoritesStore,
    ratings: RatingClient,
    auth: Arc<dyn AuthSessionAdapter>,
    settings: ViewSettings,
}

impl ViewController {
    /// Create a controller in the initial Search state
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeSource>,
        favorites: FavoritesStore,
        ratings: RatingClient,
        auth: Arc<dyn AuthSessionAdapter>,
        settings: ViewSettings,
    ) -> Self {
        let session = auth.current();
        Self {
            state: AppState::default(),
            session,
            recipes,
            favorites,
            ratings,
            auth,
            settings,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Session as last seen by the controller
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Recipe source, for running searches off the controller
    #[must_use]
    pub fn recipe_source(&self) -> Arc<dyn RecipeSource> {
        Arc::clone(&self.recipes)
    }

    /// Auth adapter
    #[must_use]
    pub fn auth(&self) -> Arc<dyn AuthSessionAdapter> {
        Arc::clone(&self.auth)
    }

    /// Favorites store
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    fn mode(&self) -> AuthMode {
        self.auth.mode()
    }

    /// Whether favorites may be viewed and toggled right now
    #[must_use]
    pub fn favorites_available(&self) -> bool {
        match self.mode() {
            AuthMode::Anonymous => true,
            AuthMode::ProviderBacked => {
                !self.settings.favorites_require_sign_in || self.session.is_some()
            }
        }
    }

    /// Fail before any lookup when favorites need a session
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when favorites are gated and nobody is signed in
    pub fn ensure_favorites_available(&self) -> AppResult<()> {
        if self.favorites_available() {
            Ok(())
        } else {
            Err(AppError::auth_required(messages::SIGN_IN_TO_FAVORITE))
        }
    }

    /// Check session and star range before fetching or writing anything
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` while signed out, then `ValueOutOfRange` for
    /// values outside 1..=5
    pub fn check_rating(&self, value: i64) -> AppResult<RatingValue> {
        if self.session.is_none() {
            return Err(AppError::auth_required(messages::SIGN_IN_TO_RATE));
        }
        RatingValue::new(value)
    }

    /// Whether the trending view exists in this mode
    #[must_use]
    pub fn trending_available(&self) -> bool {
        self.mode() == AuthMode::ProviderBacked
    }

    fn next_request_id(&mut self) -> u64 {
        self.state.latest_request += 1;
        self.state.latest_request
    }

    fn is_latest(&self, request_id: u64) -> bool {
        request_id == self.state.latest_request
    }

    // ================================================================================================
    // Search
    // ================================================================================================

    /// Validate a query and move to Search with a loading panel
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query; state is left unchanged
    pub fn begin_search(&mut self, query: &str) -> AppResult<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input(messages::EMPTY_QUERY));
        }
        let request_id = self.next_request_id();
        self.state.view = View::Search;
        self.state.content = Content::Loading;
        debug!(request_id, query, "Search started");
        Ok(SearchTicket {
            request_id,
            query: query.to_owned(),
        })
    }

    /// Apply a search result; returns `false` when the ticket is stale
    ///
    /// Results always update `last_search_results`, but the panel is only
    /// redrawn if the Search view is still showing.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: AppResult<Vec<RecipeSummary>>,
    ) -> bool {
        if !self.is_latest(ticket.request_id) {
            debug!(
                request_id = ticket.request_id,
                latest = self.state.latest_request,
                "Discarding stale search completion"
            );
            return false;
        }

        let content = match result {
            Ok(results) if results.is_empty() => {
                self.state.last_search_results.clear();
                Content::Empty(EmptyState::NoResults {
                    query: ticket.query.clone(),
                })
            }
            Ok(results) => {
                info!(query = %ticket.query, results = results.len(), "Search results shown");
                self.state.last_search_results.clone_from(&results);
                Content::Cards(results)
            }
            Err(e) => {
                warn!(query = %ticket.query, error = %e, "Search failed");
                Content::Error(messages::SEARCH_FAILED.to_owned())
            }
        };

        if self.state.view == View::Search {
            self.state.content = content;
        }
        true
    }

    /// Run a search to completion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query. Network failures are shown
    /// inline and are not returned.
    pub async fn search(&mut self, query: &str) -> AppResult<()> {
        let ticket = self.begin_search(query)?;
        let result = self.recipes.search(&ticket.query).await;
        self.complete_search(&ticket, result);
        Ok(())
    }

    fn show_search(&mut self) {
        self.state.view = View::Search;
        self.state.content = if self.state.last_search_results.is_empty() {
            Content::Placeholder(messages::START_SEARCHING.to_owned())
        } else {
            Content::Cards(self.state.last_search_results.clone())
        };
    }

    // ================================================================================================
    // Favorites view
    // ================================================================================================

    fn render_favorites(&mut self) -> AppResult<()> {
        let favorites = self.favorites.list()?;
        self.state.content = if favorites.is_empty() {
            Content::Empty(EmptyState::NoFavorites)
        } else {
            Content::Cards(favorites)
        };
        Ok(())
    }

    /// Switch between Favorites and Search
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when favorites need a session, or a storage
    /// error if the favorites document cannot be read
    pub fn toggle_favorites_view(&mut self) -> AppResult<()> {
        if self.state.view == View::Favorites {
            self.show_search();
            return Ok(());
        }
        if !self.favorites_available() {
            return Err(AppError::auth_required(messages::SIGN_IN_FOR_FAVORITES));
        }
        self.render_favorites()?;
        self.state.view = View::Favorites;
        Ok(())
    }

    // ================================================================================================
    // Trending view
    // ================================================================================================

    /// Move to Trending with a loading panel
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` in anonymous mode, where trending does not exist
    pub fn begin_trending(&mut self) -> AppResult<TrendingTicket> {
        if !self.trending_available() {
            return Err(AppError::invalid_input(messages::TRENDING_UNAVAILABLE));
        }
        let request_id = self.next_request_id();
        self.state.view = View::Trending;
        self.state.content = Content::Loading;
        debug!(request_id, ids = self.settings.trending_ids.len(), "Trending load started");
        Ok(TrendingTicket {
            request_id,
            ids: self.settings.trending_ids.clone(),
        })
    }

    /// Load trending recipes one at a time, skipping ids that fail
    ///
    /// # Errors
    ///
    /// Returns the last error if every id failed
    pub async fn load_trending(
        source: &dyn RecipeSource,
        ids: &[String],
    ) -> AppResult<Vec<RecipeSummary>> {
        let mut loaded = Vec::with_capacity(ids.len());
        let mut last_error = None;
        for id in ids {
            match source.lookup(id).await {
                Ok(recipe) => loaded.push(recipe.summary()),
                Err(e) => {
                    warn!(recipe_id = %id, error = %e, "Skipping trending recipe");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) if loaded.is_empty() => Err(e),
            _ => Ok(loaded),
        }
    }

    /// Apply a trending load; returns `false` when the ticket is stale
    pub fn complete_trending(
        &mut self,
        ticket: &TrendingTicket,
        result: AppResult<Vec<RecipeSummary>>,
    ) -> bool {
        if !self.is_latest(ticket.request_id) {
            debug!(request_id = ticket.request_id, "Discarding stale trending completion");
            return false;
        }
        if self.state.view != View::Trending {
            return true;
        }
        self.state.content = match result {
            Ok(recipes) => Content::Cards(recipes),
            Err(e) => {
                warn!(error = %e, "Trending load failed");
                Content::Error(messages::TRENDING_FAILED.to_owned())
            }
        };
        true
    }

    /// Switch between Trending and Search; returns a ticket when a load must run
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` in anonymous mode
    pub fn toggle_trending_view(&mut self) -> AppResult<Option<TrendingTicket>> {
        if self.state.view == View::Trending {
            self.show_search();
            return Ok(None);
        }
        self.begin_trending().map(Some)
    }

    /// Toggle trending and run the load to completion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` in anonymous mode. Load failures are shown inline.
    pub async fn trending(&mut self) -> AppResult<()> {
        if let Some(ticket) = self.toggle_trending_view()? {
            let result = Self::load_trending(self.recipes.as_ref(), &ticket.ids).await;
            self.complete_trending(&ticket, result);
        }
        Ok(())
    }

    // ================================================================================================
    // Detail modal
    // ================================================================================================

    /// Fetch a recipe and open it with the caller's own rating
    ///
    /// # Errors
    ///
    /// Returns the lookup error; the modal stays closed
    pub async fn open_recipe(&mut self, id: &str) -> AppResult<()> {
        let recipe = self.recipes.lookup(id).await?;
        let own_rating = match self.ratings.fetch_own(id, self.session.as_ref()).await {
            Ok(rating) => rating,
            Err(e) => {
                warn!(recipe_id = id, error = %e, "Could not load own rating");
                None
            }
        };
        debug!(recipe_id = id, "Recipe opened");
        self.state.modal = Some(ModalState { recipe, own_rating });
        Ok(())
    }

    /// Close the modal
    pub fn close_modal(&mut self) {
        self.state.modal = None;
    }

    /// Toggle a recipe's favorite state; returns whether it is now a favorite
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when favorites need a session, or a storage error
    pub fn toggle_favorite_recipe(&mut self, summary: &RecipeSummary) -> AppResult<bool> {
        self.ensure_favorites_available()?;
        let favorited = self.favorites.toggle(summary)?;
        if self.state.view == View::Favorites {
            self.render_favorites()?;
        }
        Ok(favorited)
    }

    /// Toggle the open recipe's favorite state
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with no recipe open, otherwise as
    /// [`Self::toggle_favorite_recipe`]
    pub fn toggle_favorite(&mut self) -> AppResult<bool> {
        let summary = self
            .state
            .modal
            .as_ref()
            .map(|modal| modal.recipe.summary())
            .ok_or_else(|| AppError::invalid_input(messages::NO_RECIPE_OPEN))?;
        self.toggle_favorite_recipe(&summary)
    }

    /// Rate the open recipe and show the stored value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with no recipe open, `AuthRequired` while
    /// signed out, `ValueOutOfRange` for values outside 1..=5, or the backend error
    pub async fn rate(&mut self, value: i64) -> AppResult<Option<RatingValue>> {
        let meal_id = self
            .state
            .modal
            .as_ref()
            .map(|modal| modal.recipe.id().to_owned())
            .ok_or_else(|| AppError::invalid_input(messages::NO_RECIPE_OPEN))?;
        let stored = self
            .ratings
            .submit(&meal_id, self.session.as_ref(), value)
            .await?;
        if let Some(modal) = self
            .state
            .modal
            .as_mut()
            .filter(|modal| modal.recipe.id() == meal_id)
        {
            modal.own_rating = stored;
        }
        Ok(stored)
    }

    // ================================================================================================
    // Session
    // ================================================================================================

    /// React to a session transition
    pub fn session_changed(&mut self, session: Option<Session>) {
        let signed_in = session.is_some();
        self.session = session;
        info!(signed_in, "Session transition applied");

        if signed_in {
            return;
        }
        if let Some(modal) = self.state.modal.as_mut() {
            modal.own_rating = None;
        }
        if self.mode() == AuthMode::ProviderBacked && self.settings.favorites_require_sign_in {
            self.state.view = View::Search;
            self.state.content = Content::Placeholder(messages::SIGN_IN_FOR_FAVORITES.to_owned());
        }
    }

    /// Reload the own rating shown in the open modal
    ///
    /// # Errors
    ///
    /// Returns the backend error; the displayed rating is left as it was
    pub async fn refresh_own_rating(&mut self) -> AppResult<()> {
        let Some(meal_id) = self
            .state
            .modal
            .as_ref()
            .map(|modal| modal.recipe.id().to_owned())
        else {
            return Ok(());
        };
        let rating = self.ratings.fetch_own(&meal_id, self.session.as_ref()).await?;
        if let Some(modal) = self.state.modal.as_mut() {
            modal.own_rating = rating;
        }
        Ok(())
    }

    // ================================================================================================
    // Rendering
    // ================================================================================================

    /// Describe the current frame
    ///
    /// # Errors
    ///
    /// Returns a storage error if the favorites document cannot be read
    pub fn screen(&self) -> AppResult<Screen> {
        let enabled = self.favorites_available();
        let favorites = if enabled {
            self.favorites.list()?
        } else {
            Vec::new()
        };
        let favorite_ids: HashSet<String> = favorites.into_iter().map(|recipe| recipe.id).collect();

        let favorites_button = FavoritesButton {
            label: if self.state.view == View::Favorites {
                BACK_LABEL
            } else {
                FAVORITES_LABEL
            },
            enabled,
            count: favorite_ids.len(),
        };
        let trending_label = self.trending_available().then_some(
            if self.state.view == View::Trending {
                BACK_LABEL
            } else {
                TRENDING_LABEL
            },
        );
        let modal = self.state.modal.as_ref().map(|modal| DetailView {
            favorited: favorite_ids.contains(modal.recipe.id()),
            recipe: modal.recipe.clone(),
            own_rating: modal.own_rating.filter(|_| self.session.is_some()),
            can_rate: self.session.is_some(),
            average_label: messages::AVERAGE_PLACEHOLDER,
        });

        Ok(Screen {
            view: self.state.view,
            content: self.state.content.clone(),
            favorite_ids,
            favorites_button,
            trending_label,
            user: self.session.as_ref().map(|s| s.display_name().to_owned()),
            modal,
        })
    }
}
