// ABOUTME: TheMealDB API client for recipe search and detail lookup
// ABOUTME: Normalizes "no results" into an empty list and maps transport failures to AppError

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! TheMealDB API Client
//!
//! Two read-only endpoints are used:
//! - `search.php?s={query}` returns summaries for a free-text query
//! - `lookup.php?i={id}` returns one recipe with up to 20 numbered
//!   ingredient/measure pairs
//!
//! Both answer `{"meals": null}` when nothing matches. A search turns that
//! into an empty list (an empty state, not an error); a lookup turns it into
//! `ResourceNotFound`.
//!
//! # Example
//! ```rust,no_run
//! use recipe_finder::external::{MealDbClient, RecipeSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MealDbClient::new("https://www.themealdb.com/api/json/v1/1");
//! let meals = client.search("arrabiata").await?;
//! if let Some(first) = meals.first() {
//!     let detail = client.lookup(&first.id).await?;
//!     println!("{} needs {} ingredients", detail.summary.name, detail.ingredients.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::constants::{endpoints, service_names::MEAL_DB};
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, RecipeDetail, RecipeSummary};
use crate::utils::http_client::{ensure_success, join_url, json_body, send, shared_client};

/// Highest numbered ingredient slot in a lookup record
const MAX_INGREDIENT_SLOTS: usize = 20;

/// Read-only recipe lookups used by the view controller
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Free-text search; an empty list means no matches
    async fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>>;

    /// Resolve one recipe id to its full detail
    async fn lookup(&self, id: &str) -> AppResult<RecipeDetail>;
}

/// `{"meals": [...] | null}` envelope shared by both endpoints
#[derive(Debug, Deserialize)]
struct MealsResponse {
    meals: Option<Vec<MealRecord>>,
}

#[derive(Debug, Deserialize)]
struct MealRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    /// `strIngredientN` / `strMeasureN` and everything else
    #[serde(flatten)]
    numbered: HashMap<String, Value>,
}

impl MealRecord {
    fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail_url: self.thumbnail.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            cuisine: self.area.clone().unwrap_or_default(),
        }
    }

    fn numbered_text(&self, prefix: &str, slot: usize) -> Option<&str> {
        self.numbered
            .get(&format!("{prefix}{slot}"))
            .and_then(Value::as_str)
            .map(str::trim)
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = self
                    .numbered_text("strIngredient", slot)
                    .filter(|name| !name.is_empty())?;
                let measure = self.numbered_text("strMeasure", slot).unwrap_or_default();
                Some(Ingredient {
                    measure: measure.to_owned(),
                    name: name.to_owned(),
                })
            })
            .collect()
    }

    fn into_detail(self) -> RecipeDetail {
        let summary = self.summary();
        let ingredients = self.ingredients();
        let tags = self
            .tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        RecipeDetail {
            summary,
            instructions: self.instructions.unwrap_or_default().trim().to_owned(),
            ingredients,
            tags,
            video_url: self.youtube.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// TheMealDB HTTP client
pub struct MealDbClient {
    base_url: String,
    http_client: Client,
}

impl MealDbClient {
    /// Create a client using the shared HTTP client
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, shared_client().clone())
    }

    /// Create a client with a specific HTTP client (custom timeouts)
    #[must_use]
    pub fn with_http_client(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    async fn fetch_meals(&self, path: &str, param: (&str, &str)) -> AppResult<Vec<MealRecord>> {
        let url = join_url(&self.base_url, path);
        let response = send(MEAL_DB, self.http_client.get(&url).query(&[param])).await?;
        let response = ensure_success(MEAL_DB, response).await?;
        let body: MealsResponse = json_body(MEAL_DB, response).await?;
        Ok(body.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let meals = self
            .fetch_meals(endpoints::MEAL_DB_SEARCH_PATH, ("s", query))
            .await?;
        info!(query, results = meals.len(), "Recipe search completed");
        Ok(meals.iter().map(MealRecord::summary).collect())
    }

    async fn lookup(&self, id: &str) -> AppResult<RecipeDetail> {
        let meals = self
            .fetch_meals(endpoints::MEAL_DB_LOOKUP_PATH, ("i", id))
            .await?;
        let record = meals
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        debug!(recipe_id = id, "Recipe detail loaded");
        Ok(record.into_detail())
    }
}

/// In-memory recipe source for tests and offline demos (no API calls)
///
/// Lookups are recorded in call order so callers can assert sequencing.
#[derive(Default)]
pub struct MockRecipeSource {
    recipes: Vec<RecipeDetail>,
    failing_ids: HashSet<String>,
    offline: bool,
    lookups: Mutex<Vec<String>>,
}

impl MockRecipeSource {
    /// Empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe
    #[must_use]
    pub fn with_recipe(mut self, recipe: RecipeDetail) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Make lookups of `id` fail with a network error
    #[must_use]
    pub fn with_failing_id(mut self, id: impl Into<String>) -> Self {
        self.failing_ids.insert(id.into());
        self
    }

    /// Make every call fail with a network error
    #[must_use]
    pub const fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Ids looked up so far, in call order
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Convenience recipe builder for tests and demos
    #[must_use]
    pub fn recipe(id: &str, name: &str) -> RecipeDetail {
        RecipeDetail {
            summary: RecipeSummary {
                id: id.to_owned(),
                name: name.to_owned(),
                thumbnail_url: format!("https://www.themealdb.com/images/media/meals/{id}.jpg"),
                category: "Miscellaneous".to_owned(),
                cuisine: "Unknown".to_owned(),
            },
            instructions: format!("Cook the {name}."),
            ingredients: vec![Ingredient {
                measure: "1".to_owned(),
                name: "Love".to_owned(),
            }],
            tags: Vec::new(),
            video_url: None,
        }
    }

    fn unavailable() -> AppError {
        AppError::external_unavailable(MEAL_DB, "mock source offline")
    }
}

#[async_trait]
impl RecipeSource for MockRecipeSource {
    async fn search(&self, query: &str) -> AppResult<Vec<RecipeSummary>> {
        if self.offline {
            return Err(Self::unavailable());
        }
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| recipe.summary.name.to_lowercase().contains(&query))
            .map(RecipeDetail::summary)
            .collect())
    }

    async fn lookup(&self, id: &str) -> AppResult<RecipeDetail> {
        if let Ok(mut calls) = self.lookups.lock() {
            calls.push(id.to_owned());
        }
        if self.offline || self.failing_ids.contains(id) {
            return Err(Self::unavailable());
        }
        self.recipes
            .iter()
            .find(|recipe| recipe.id() == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MealRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ingredients_skip_blank_slots() {
        let meal = record(json!({
            "idMeal": "52771",
            "strMeal": "Spicy Arrabiata Penne",
            "strIngredient1": "penne rigate",
            "strMeasure1": "1 pound",
            "strIngredient2": "  ",
            "strMeasure2": " ",
            "strIngredient3": "olive oil",
            "strMeasure3": null,
            "strIngredient4": null,
        }));
        let ingredients = meal.ingredients();
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].display_line(), "1 pound penne rigate");
        assert_eq!(ingredients[1].display_line(), "olive oil");
    }

    #[test]
    fn test_detail_mapping() {
        let detail = record(json!({
            "idMeal": "52771",
            "strMeal": "Spicy Arrabiata Penne",
            "strCategory": "Vegetarian",
            "strArea": "Italian",
            "strMealThumb": "https://example.test/penne.jpg",
            "strInstructions": "  Bring a large pot of water to a boil.\r\n",
            "strTags": "Pasta,Curry",
            "strYoutube": "",
        }))
        .into_detail();
        assert_eq!(detail.summary.cuisine, "Italian");
        assert_eq!(detail.instructions, "Bring a large pot of water to a boil.");
        assert_eq!(detail.tags, vec!["Pasta", "Curry"]);
        assert!(detail.video_url.is_none());
    }

    #[test]
    fn test_null_meals_is_empty() {
        let body: MealsResponse = serde_json::from_value(json!({ "meals": null })).unwrap();
        assert!(body.meals.is_none());
    }

    #[tokio::test]
    async fn test_mock_records_lookup_order() {
        let source = MockRecipeSource::new()
            .with_recipe(MockRecipeSource::recipe("1", "Pie"))
            .with_failing_id("2");
        assert!(source.lookup("1").await.is_ok());
        assert!(source.lookup("2").await.is_err());
        assert_eq!(source.lookups(), vec!["1", "2"]);
    }
}
