// ABOUTME: Core data models shared by the client library and the CLI
// ABOUTME: Re-exports recipe, rating, session and theme types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

/// Recipe summaries and details
pub mod recipe;

/// Star ratings keyed by (meal, user)
pub mod rating;

/// Signed-in identity and tokens
pub mod session;

/// Dark/light display preference
pub mod theme;

pub use rating::{Rating, RatingValue};
pub use recipe::{Ingredient, RecipeDetail, RecipeSummary};
pub use session::{AuthMode, AuthUser, Session};
pub use theme::Theme;
