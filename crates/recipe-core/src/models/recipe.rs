// ABOUTME: Recipe domain models used for result cards, favorites and the detail view
// ABOUTME: RecipeSummary is the denormalized list record, RecipeDetail the full lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use serde::{Deserialize, Serialize};

/// Minimal denormalized record used for list rendering and favorites
///
/// Identity is `id`; two summaries with the same id describe the same recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Recipe id as issued by the recipe API
    pub id: String,
    /// Display name
    pub name: String,
    /// Thumbnail image URL
    pub thumbnail_url: String,
    /// Category (e.g. "Seafood")
    pub category: String,
    /// Cuisine / area (e.g. "Italian")
    pub cuisine: String,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity text, may be empty
    pub measure: String,
    /// Ingredient name, never blank
    pub name: String,
}

impl Ingredient {
    /// Render as "measure name", dropping the measure when absent
    #[must_use]
    pub fn display_line(&self) -> String {
        if self.measure.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.measure, self.name)
        }
    }
}

/// Full recipe as returned by the detail lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: RecipeSummary,
    /// Free-text instructions
    pub instructions: String,
    /// Ingredient lines in API order
    pub ingredients: Vec<Ingredient>,
    /// Tags, if the API supplied any
    #[serde(default)]
    pub tags: Vec<String>,
    /// Video link, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl RecipeDetail {
    /// Project to the summary stored in favorites, discarding the richer detail
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        self.summary.clone()
    }

    /// Recipe id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary.id
    }
}

impl From<&RecipeDetail> for RecipeSummary {
    fn from(detail: &RecipeDetail) -> Self {
        detail.summary()
    }
}
