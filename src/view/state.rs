// ABOUTME: View state owned by the controller and the Screen value it renders into
// ABOUTME: Screen is a plain description of what to draw; rendering is the caller's concern

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{RatingValue, RecipeDetail, RecipeSummary};

/// Which list is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Search results or a placeholder
    Search,
    /// Saved favorites
    Favorites,
    /// Fixed list of featured recipes
    Trending,
}

/// Nothing-to-show states that are not errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyState {
    /// A search matched nothing
    NoResults {
        /// The query as searched
        query: String,
    },
    /// The favorites list is empty
    NoFavorites,
}

/// Body of the main panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    /// Instructional text
    Placeholder(String),
    /// A request is in flight
    Loading,
    /// Recipe cards in display order
    Cards(Vec<RecipeSummary>),
    /// Empty result
    Empty(EmptyState),
    /// Inline error message
    Error(String),
}

/// Open recipe detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    /// Full recipe
    pub recipe: RecipeDetail,
    /// Caller's own rating; always `None` while signed out
    pub own_rating: Option<RatingValue>,
}

/// Everything the controller tracks between events
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current view
    pub view: View,
    /// Main panel body
    pub content: Content,
    /// Results of the latest applied search
    pub last_search_results: Vec<RecipeSummary>,
    /// Latest issued search or trending request id
    pub latest_request: u64,
    /// Open detail modal
    pub modal: Option<ModalState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Search,
            content: Content::Placeholder(crate::constants::messages::START_SEARCHING.to_owned()),
            last_search_results: Vec::new(),
            latest_request: 0,
            modal: None,
        }
    }
}

/// Favorites toggle button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesButton {
    /// "Favorites" or "Back to Search"
    pub label: &'static str,
    /// Whether favorites can be viewed right now
    pub enabled: bool,
    /// Badge count; 0 while disabled
    pub count: usize,
}

/// Detail modal as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Full recipe
    pub recipe: RecipeDetail,
    /// Favorite button state
    pub favorited: bool,
    /// Own rating, if signed in and rated
    pub own_rating: Option<RatingValue>,
    /// Whether the rating widget accepts input
    pub can_rate: bool,
    /// Average rating slot
    pub average_label: &'static str,
}

/// One frame of UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Current view
    pub view: View,
    /// Main panel body
    pub content: Content,
    /// Every favorited recipe id, used to mark cards and the modal
    pub favorite_ids: HashSet<String>,
    /// Favorites button
    pub favorites_button: FavoritesButton,
    /// Trending button label; `None` when trending is unavailable
    pub trending_label: Option<&'static str>,
    /// Signed-in user display name
    pub user: Option<String>,
    /// Open detail modal
    pub modal: Option<DetailView>,
}
