// ABOUTME: Integration tests for the TheMealDB client against an in-process mock API
// ABOUTME: Covers result mapping, null meal lists, detail lookup and network failure classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use common::{init_test_logging, spawn_mock_server};
use recipe_finder::{
    errors::ErrorCode,
    external::{MealDbClient, RecipeSource},
};
use serde_json::{json, Value};

fn arrabiata_record() -> Value {
    json!({
        "idMeal": "52771",
        "strMeal": "Spicy Arrabiata Penne",
        "strCategory": "Vegetarian",
        "strArea": "Italian",
        "strInstructions": "Bring a large pot of water to a boil.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/ustsqw1468250014.jpg",
        "strTags": "Pasta,Curry",
        "strYoutube": "https://www.youtube.com/watch?v=1IszT_guI08",
        "strIngredient1": "penne rigate",
        "strMeasure1": "1 pound",
        "strIngredient2": "olive oil",
        "strMeasure2": "1/4 cup",
        "strIngredient3": "",
        "strMeasure3": "",
        "strIngredient4": null,
        "strMeasure4": null
    })
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("s").map(String::as_str) {
        Some("arrabiata") => Json(json!({ "meals": [arrabiata_record()] })),
        _ => Json(json!({ "meals": null })),
    }
}

async fn lookup(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("i").map(String::as_str) {
        Some("52771") => Json(json!({ "meals": [arrabiata_record()] })),
        _ => Json(json!({ "meals": null })),
    }
}

async fn mock_api() -> String {
    init_test_logging();
    let router = Router::new()
        .route("/search.php", get(search))
        .route("/lookup.php", get(lookup));
    spawn_mock_server(router).await
}

#[tokio::test]
async fn test_search_maps_summaries() {
    let client = MealDbClient::new(mock_api().await);

    let results = client.search("arrabiata").await.unwrap();

    assert_eq!(results.len(), 1);
    let summary = &results[0];
    assert_eq!(summary.id, "52771");
    assert_eq!(summary.name, "Spicy Arrabiata Penne");
    assert_eq!(summary.category, "Vegetarian");
    assert_eq!(summary.cuisine, "Italian");
    assert!(summary.thumbnail_url.ends_with(".jpg"));
}

#[tokio::test]
async fn test_null_meals_is_an_empty_result() {
    let client = MealDbClient::new(mock_api().await);
    assert!(client.search("xyzzy").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lookup_returns_detail_with_ingredients() {
    let client = MealDbClient::new(mock_api().await);

    let recipe = client.lookup("52771").await.unwrap();

    let lines: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|ingredient| ingredient.display_line())
        .collect();
    assert_eq!(lines, vec!["1 pound penne rigate", "1/4 cup olive oil"]);
    assert_eq!(recipe.tags, vec!["Pasta", "Curry"]);
    assert!(recipe.video_url.is_some());
    assert!(recipe.instructions.starts_with("Bring"));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let client = MealDbClient::new(mock_api().await);
    let error = client.lookup("1").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_server_error_is_a_network_failure() {
    init_test_logging();
    let router = Router::new().route(
        "/search.php",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = MealDbClient::new(spawn_mock_server(router).await);

    let error = client.search("arrabiata").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.code.is_network());
}

#[tokio::test]
async fn test_unreachable_host_is_unavailable() {
    init_test_logging();
    let client = MealDbClient::new("http://127.0.0.1:9");

    let error = client.search("arrabiata").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}
