// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, default endpoints, rating bounds and user-facing copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Default remote endpoints
pub mod endpoints;

/// Keys of the documents kept in local storage
pub mod storage_keys {
    /// JSON array of favorited recipe summaries
    pub const FAVORITES: &str = "favorites";
    /// Display theme, `"dark"` or `"light"`
    pub const THEME: &str = "theme";
    /// Persisted identity-provider session
    pub const SESSION: &str = "session";
    /// Local ratings document, used when no backend table exists
    pub const RATINGS: &str = "ratings";
}

/// Rating bounds
pub mod ratings {
    /// Lowest accepted star value
    pub const MIN_STARS: u8 = 1;
    /// Highest accepted star value
    pub const MAX_STARS: u8 = 5;
    /// Default backend table for ratings
    pub const DEFAULT_TABLE: &str = "ratings";
}

/// HTTP client defaults
pub mod http {
    /// Request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Session handling
pub mod session {
    /// Refresh tokens that expire within this many seconds
    pub const EXPIRY_LEEWAY_SECS: i64 = 60;
}

/// Recipes shown by the trending view unless overridden
pub mod trending {
    /// Fixed list of recipe ids, fetched one at a time
    pub const DEFAULT_RECIPE_IDS: &[&str] = &["52772", "52874", "52959", "52844", "53049", "52977"];
}

/// Service names used in logs and errors
pub mod service_names {
    /// Binary / service name
    pub const RECIPE_FINDER: &str = "recipe-finder";
    /// Recipe API
    pub const MEAL_DB: &str = "TheMealDB";
    /// Supabase auth
    pub const SUPABASE_AUTH: &str = "Supabase Auth";
    /// Supabase PostgREST
    pub const SUPABASE_REST: &str = "Supabase";
    /// Firebase auth
    pub const FIREBASE_AUTH: &str = "Firebase Auth";
}

/// User-facing copy
pub mod messages {
    /// Empty query rejection
    pub const EMPTY_QUERY: &str = "Please enter a recipe to search for!";
    /// Placeholder before the first search
    pub const START_SEARCHING: &str = "Search for recipes using the search box above!";
    /// Placeholder while signed out in provider-backed mode
    pub const SIGN_IN_FOR_FAVORITES: &str = "Please sign in to view your favorites";
    /// Prompt for rating while signed out
    pub const SIGN_IN_TO_RATE: &str = "Please sign in to rate recipes";
    /// Prompt for favoriting while signed out
    pub const SIGN_IN_TO_FAVORITE: &str = "Please sign in to save favorites";
    /// Inline error when a search fails
    pub const SEARCH_FAILED: &str = "Failed to fetch recipes. Please try again!";
    /// Inline error when no trending recipe could be loaded
    pub const TRENDING_FAILED: &str = "Failed to load trending recipes. Please try again!";
    /// Trending requested without an identity provider
    pub const TRENDING_UNAVAILABLE: &str = "Trending recipes are not available in this mode";
    /// Modal action with no recipe open
    pub const NO_RECIPE_OPEN: &str = "Open a recipe first";
    /// Average rating slot; aggregation is not implemented
    pub const AVERAGE_PLACEHOLDER: &str = "No ratings yet";
}
