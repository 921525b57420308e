// ABOUTME: Integration tests for the Supabase rating store against a mock PostgREST table
// ABOUTME: Verifies upsert-on-conflict headers, per-user reads and read-after-write through RatingClient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{init_test_logging, session, spawn_mock_server};
use recipe_finder::{
    config::SupabaseConfig,
    errors::ErrorCode,
    models::RatingValue,
    ratings::{RatingClient, SupabaseRatingStore},
};
use serde_json::{json, Value};

type Table = Arc<Mutex<Vec<Value>>>;

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    headers.get("apikey").is_some() && bearer
}

async fn upsert(
    State(table): State<Table>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(rows): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "JWT expired" }))).into_response();
    }
    let merge = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("resolution=merge-duplicates"));
    if params.get("on_conflict").map(String::as_str) != Some("meal_id,user_id") || !merge {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "code": "23505", "message": "duplicate key value violates unique constraint" })),
        )
            .into_response();
    }

    let mut table = table.lock().unwrap();
    for row in rows {
        table.retain(|existing| {
            existing["meal_id"] != row["meal_id"] || existing["user_id"] != row["user_id"]
        });
        table.push(row);
    }
    StatusCode::CREATED.into_response()
}

async fn select(
    State(table): State<Table>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let meal = params.get("meal_id").and_then(|v| v.strip_prefix("eq.")).unwrap_or_default();
    let user = params.get("user_id").and_then(|v| v.strip_prefix("eq.")).unwrap_or_default();
    let rows: Vec<Value> = table
        .lock()
        .unwrap()
        .iter()
        .filter(|row| row["meal_id"] == meal && row["user_id"] == user)
        .map(|row| json!({ "rating": row["rating"] }))
        .collect();
    Json(rows).into_response()
}

async fn mock_table() -> (SupabaseConfig, Table) {
    init_test_logging();
    let table: Table = Arc::default();
    let router = Router::new()
        .route("/rest/v1/ratings", get(select).post(upsert))
        .with_state(Arc::clone(&table));
    let config = SupabaseConfig {
        url: spawn_mock_server(router).await,
        anon_key: "anon-key".to_owned(),
        ratings_table: "ratings".to_owned(),
    };
    (config, table)
}

#[tokio::test]
async fn test_later_rating_replaces_earlier() {
    let (config, table) = mock_table().await;
    let ratings = RatingClient::new(Arc::new(SupabaseRatingStore::new(&config)));
    let cook = session("cook");

    ratings.submit("52771", Some(&cook), 4).await.unwrap();
    let stored = ratings.submit("52771", Some(&cook), 2).await.unwrap();

    assert_eq!(stored.map(RatingValue::get), Some(2));
    assert_eq!(table.lock().unwrap().len(), 1);
    assert_eq!(
        ratings
            .fetch_own("52771", Some(&cook))
            .await
            .unwrap()
            .map(RatingValue::get),
        Some(2)
    );
}

#[tokio::test]
async fn test_rows_carry_meal_user_and_value() {
    let (config, table) = mock_table().await;
    let ratings = RatingClient::new(Arc::new(SupabaseRatingStore::new(&config)));

    ratings.submit("52982", Some(&session("cook")), 5).await.unwrap();

    let row = table.lock().unwrap()[0].clone();
    assert_eq!(row, json!({ "meal_id": "52982", "user_id": "cook", "rating": 5 }));
}

#[tokio::test]
async fn test_other_users_rating_is_not_visible() {
    let (config, _table) = mock_table().await;
    let ratings = RatingClient::new(Arc::new(SupabaseRatingStore::new(&config)));

    ratings.submit("52771", Some(&session("alice")), 5).await.unwrap();

    assert!(ratings
        .fetch_own("52771", Some(&session("bob")))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_invalid_values_never_reach_the_table() {
    let (config, table) = mock_table().await;
    let ratings = RatingClient::new(Arc::new(SupabaseRatingStore::new(&config)));

    for value in [0, 6, -1] {
        let error = ratings
            .submit("52771", Some(&session("cook")), value)
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }
    let error = ratings.submit("52771", None, 3).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);
    assert!(table.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_rejection_is_a_network_error() {
    init_test_logging();
    let router = Router::new().route(
        "/rest/v1/ratings",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE })
            .post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let config = SupabaseConfig {
        url: spawn_mock_server(router).await,
        anon_key: "anon-key".to_owned(),
        ratings_table: "ratings".to_owned(),
    };
    let ratings = RatingClient::new(Arc::new(SupabaseRatingStore::new(&config)));

    let error = ratings
        .submit("52771", Some(&session("cook")), 3)
        .await
        .unwrap_err();
    assert!(error.code.is_network());
}
