// ABOUTME: External API client modules (TheMealDB)
// ABOUTME: Provides recipe search and detail lookup behind the RecipeSource trait

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! External API Clients

pub mod meal_db_client;

// Re-export commonly used types
pub use meal_db_client::{MealDbClient, MockRecipeSource, RecipeSource};
