// ABOUTME: Favorites store over local storage, keyed by recipe id
// ABOUTME: Every mutation rewrites the whole `favorites` document

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Favorites
//!
//! Favorites live in a single local document: a JSON array of
//! [`RecipeSummary`] in insertion order. They are per-browser (here:
//! per-data-directory) and never synced to a backend.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::RecipeSummary;
use crate::storage::{read_json, write_json, SharedStore};

/// Ordered, id-unique list of favorited recipe summaries
#[derive(Clone)]
pub struct FavoritesStore {
    store: SharedStore,
}

impl FavoritesStore {
    /// Wrap a storage handle
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All favorites in insertion order; empty if none were ever saved
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or decoded
    pub fn list(&self) -> AppResult<Vec<RecipeSummary>> {
        let stored: Vec<RecipeSummary> =
            read_json(self.store.as_ref(), storage_keys::FAVORITES)?.unwrap_or_default();

        let mut seen = HashSet::new();
        let total = stored.len();
        let unique: Vec<RecipeSummary> = stored
            .into_iter()
            .filter(|summary| seen.insert(summary.id.clone()))
            .collect();
        if unique.len() != total {
            warn!(
                dropped = total - unique.len(),
                "Favorites document contained duplicate ids"
            );
        }
        Ok(unique)
    }

    /// Number of favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or decoded
    pub fn count(&self) -> AppResult<usize> {
        Ok(self.list()?.len())
    }

    /// Whether a favorite with this id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or decoded
    pub fn is_favorited(&self, id: &str) -> AppResult<bool> {
        Ok(self.list()?.iter().any(|summary| summary.id == id))
    }

    /// Remove the recipe if present, otherwise append it; returns the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read, decoded or written
    pub fn toggle(&self, summary: &RecipeSummary) -> AppResult<bool> {
        let mut favorites = self.list()?;
        let now_favorited = match favorites.iter().position(|fav| fav.id == summary.id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(summary.clone());
                true
            }
        };

        write_json(self.store.as_ref(), storage_keys::FAVORITES, &favorites)?;
        debug!(
            recipe_id = %summary.id,
            favorited = now_favorited,
            count = favorites.len(),
            "Favorite toggled"
        );
        Ok(now_favorited)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn summary(id: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_owned(),
            name: format!("Recipe {id}"),
            thumbnail_url: String::new(),
            category: "Dessert".to_owned(),
            cuisine: "British".to_owned(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let favorites = FavoritesStore::new(Arc::new(MemoryStore::new()));
        assert!(favorites.list().unwrap().is_empty());
        assert_eq!(favorites.count().unwrap(), 0);
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let favorites = FavoritesStore::new(Arc::new(MemoryStore::new()));
        assert!(favorites.toggle(&summary("1")).unwrap());
        assert!(favorites.toggle(&summary("2")).unwrap());
        assert!(favorites.toggle(&summary("3")).unwrap());
        assert!(!favorites.toggle(&summary("2")).unwrap());

        let ids: Vec<String> = favorites.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_duplicate_document_is_deduplicated_on_read() {
        let store = Arc::new(MemoryStore::new());
        let doc = serde_json::to_string(&vec![summary("7"), summary("7"), summary("8")]).unwrap();
        store.set(storage_keys::FAVORITES, &doc).unwrap();

        let favorites = FavoritesStore::new(store);
        assert_eq!(favorites.count().unwrap(), 2);
        assert!(!favorites.toggle(&summary("7")).unwrap());
        assert!(!favorites.is_favorited("7").unwrap());
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.set(storage_keys::FAVORITES, "{not json").unwrap();
        let favorites = FavoritesStore::new(store);
        assert!(favorites.list().is_err());
    }
}
