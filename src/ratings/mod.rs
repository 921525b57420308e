// ABOUTME: Rating client and the RatingStore seam for backend persistence
// ABOUTME: Validates stars and sessions before any write, then reads the stored value back

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Ratings
//!
//! A rating is unique per `(meal_id, user_id)`: a later write for the same
//! pair replaces the earlier one. The client never echoes the submitted value
//! locally; after a successful upsert it re-reads the caller's rating so the
//! displayed stars reflect whatever the backend stored.
//!
//! Only the caller's own rating is ever read. There is no aggregation across
//! users.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::{Rating, RatingValue, Session};

/// Ratings kept in a local storage document
pub mod local;

/// Ratings kept in a Supabase table via PostgREST
pub mod supabase;

pub use local::LocalRatingStore;
pub use supabase::SupabaseRatingStore;

/// Persistence for ratings keyed by `(meal_id, user_id)`
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Insert or replace the caller's rating
    async fn upsert(&self, session: &Session, rating: &Rating) -> AppResult<()>;

    /// The caller's own rating for a meal, if any
    async fn fetch_own(&self, session: &Session, meal_id: &str) -> AppResult<Option<RatingValue>>;
}

/// Rating operations as the UI uses them
#[derive(Clone)]
pub struct RatingClient {
    store: Arc<dyn RatingStore>,
}

impl RatingClient {
    /// Wrap a backend
    #[must_use]
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self { store }
    }

    /// Upsert a rating and return the value read back from the store
    ///
    /// # Errors
    ///
    /// - `AuthRequired` without a session, before any request
    /// - `ValueOutOfRange` for values outside 1..=5, with nothing written
    /// - network or storage errors from the backend, not retried
    pub async fn submit(
        &self,
        meal_id: &str,
        session: Option<&Session>,
        value: i64,
    ) -> AppResult<Option<RatingValue>> {
        let session = session.ok_or_else(|| AppError::auth_required(messages::SIGN_IN_TO_RATE))?;
        let rating = RatingValue::new(value)?;

        self.store
            .upsert(
                session,
                &Rating {
                    meal_id: meal_id.to_owned(),
                    user_id: session.user_id().to_owned(),
                    rating,
                },
            )
            .await?;
        info!(meal_id, user_id = session.user_id(), %rating, "Rating submitted");

        let stored = self.store.fetch_own(session, meal_id).await?;
        if stored.is_none() {
            warn!(meal_id, "Rating not visible after write");
        }
        Ok(stored)
    }

    /// The caller's own rating; always `None` for an anonymous session
    ///
    /// # Errors
    ///
    /// Returns network or storage errors from the backend
    pub async fn fetch_own(
        &self,
        meal_id: &str,
        session: Option<&Session>,
    ) -> AppResult<Option<RatingValue>> {
        match session {
            Some(session) => self.store.fetch_own(session, meal_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::AuthUser;
    use crate::storage::MemoryStore;

    fn session(user: &str) -> Session {
        Session {
            user: AuthUser {
                id: user.to_owned(),
                email: Some(format!("{user}@example.test")),
            },
            access_token: "token".to_owned(),
            refresh_token: None,
            expires_at: None,
        }
    }

    fn client() -> RatingClient {
        RatingClient::new(Arc::new(LocalRatingStore::new(Arc::new(MemoryStore::new()))))
    }

    #[tokio::test]
    async fn test_later_submit_replaces_earlier() {
        let ratings = client();
        let alice = session("alice");
        ratings.submit("52771", Some(&alice), 4).await.unwrap();
        let stored = ratings.submit("52771", Some(&alice), 2).await.unwrap();
        assert_eq!(stored.map(RatingValue::get), Some(2));
        assert_eq!(
            ratings
                .fetch_own("52771", Some(&alice))
                .await
                .unwrap()
                .map(RatingValue::get),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_out_of_range_writes_nothing() {
        let ratings = client();
        let alice = session("alice");
        for value in [0, 6] {
            let error = ratings.submit("52771", Some(&alice), value).await.unwrap_err();
            assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        }
        assert!(ratings.fetch_own("52771", Some(&alice)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_anonymous_cannot_rate_or_see_ratings() {
        let ratings = client();
        let error = ratings.submit("52771", None, 3).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::AuthRequired);
        assert!(ratings.fetch_own("52771", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ratings_are_per_user() {
        let ratings = client();
        ratings.submit("1", Some(&session("alice")), 5).await.unwrap();
        assert!(ratings
            .fetch_own("1", Some(&session("bob")))
            .await
            .unwrap()
            .is_none());
    }
}
