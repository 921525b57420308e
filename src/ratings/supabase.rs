// ABOUTME: Supabase rating store using PostgREST upserts on (meal_id, user_id)
// ABOUTME: Calls are authorized with the session's access token and the project anon key

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Supabase ratings table
//!
//! Expected table shape:
//!
//! ```sql
//! create table ratings (
//!   meal_id text not null,
//!   user_id uuid not null references auth.users (id),
//!   rating  smallint not null check (rating between 1 and 5),
//!   primary key (meal_id, user_id)
//! );
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::RatingStore;
use crate::config::SupabaseConfig;
use crate::constants::{endpoints, service_names::SUPABASE_REST};
use crate::errors::AppResult;
use crate::models::{Rating, RatingValue, Session};
use crate::utils::http_client::{ensure_success, join_url, json_body, send, shared_client};

#[derive(Debug, Deserialize)]
struct RatingRow {
    rating: RatingValue,
}

/// PostgREST-backed rating store
pub struct SupabaseRatingStore {
    table_url: String,
    anon_key: String,
    http_client: Client,
}

impl SupabaseRatingStore {
    /// Create a store for the configured project and table
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a store with a specific HTTP client
    #[must_use]
    pub fn with_http_client(config: &SupabaseConfig, http_client: Client) -> Self {
        let rest_url = join_url(&config.url, endpoints::SUPABASE_REST_PATH);
        Self {
            table_url: join_url(&rest_url, &config.ratings_table),
            anon_key: config.anon_key.clone(),
            http_client,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
    }
}

#[async_trait]
impl RatingStore for SupabaseRatingStore {
    async fn upsert(&self, session: &Session, rating: &Rating) -> AppResult<()> {
        let request = self
            .http_client
            .post(&self.table_url)
            .query(&[("on_conflict", "meal_id,user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[rating]);
        let response = send(SUPABASE_REST, self.authorized(request, session)).await?;
        ensure_success(SUPABASE_REST, response).await?;
        debug!(meal_id = %rating.meal_id, "Rating upserted");
        Ok(())
    }

    async fn fetch_own(&self, session: &Session, meal_id: &str) -> AppResult<Option<RatingValue>> {
        let meal_filter = format!("eq.{meal_id}");
        let user_filter = format!("eq.{}", session.user_id());
        let request = self.http_client.get(&self.table_url).query(&[
            ("select", "rating"),
            ("meal_id", meal_filter.as_str()),
            ("user_id", user_filter.as_str()),
            ("limit", "1"),
        ]);
        let response = send(SUPABASE_REST, self.authorized(request, session)).await?;
        let response = ensure_success(SUPABASE_REST, response).await?;
        let rows: Vec<RatingRow> = json_body(SUPABASE_REST, response).await?;
        Ok(rows.into_iter().next().map(|row| row.rating))
    }
}
