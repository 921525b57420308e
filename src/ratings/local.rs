// ABOUTME: Local rating store kept as one `ratings` document in key-value storage
// ABOUTME: Used with identity providers that have no ratings table, and in tests

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::RatingStore;
use crate::constants::storage_keys;
use crate::errors::AppResult;
use crate::models::{Rating, RatingValue, Session};
use crate::storage::{read_json, write_json, SharedStore};

/// Ratings persisted as a JSON array of `{meal_id, user_id, rating}` rows
pub struct LocalRatingStore {
    store: SharedStore,
    /// Serializes read-modify-write cycles on the document
    write_lock: Mutex<()>,
}

impl LocalRatingStore {
    /// Wrap a storage handle
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn rows(&self) -> AppResult<Vec<Rating>> {
        Ok(read_json(self.store.as_ref(), storage_keys::RATINGS)?.unwrap_or_default())
    }
}

#[async_trait]
impl RatingStore for LocalRatingStore {
    async fn upsert(&self, _session: &Session, rating: &Rating) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rows = self.rows()?;
        match rows
            .iter_mut()
            .find(|row| row.meal_id == rating.meal_id && row.user_id == rating.user_id)
        {
            Some(row) => row.rating = rating.rating,
            None => rows.push(rating.clone()),
        }
        write_json(self.store.as_ref(), storage_keys::RATINGS, &rows)
    }

    async fn fetch_own(&self, session: &Session, meal_id: &str) -> AppResult<Option<RatingValue>> {
        Ok(self
            .rows()?
            .into_iter()
            .find(|row| row.meal_id == meal_id && row.user_id == session.user_id())
            .map(|row| row.rating))
    }
}
