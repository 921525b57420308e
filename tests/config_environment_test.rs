// ABOUTME: Integration tests for environment-driven configuration loading
// ABOUTME: Exercises AppConfig::from_env against real process variables, serialized across tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;
use std::path::PathBuf;

use common::init_test_logging;
use recipe_finder::config::environment::{AppConfig, AuthConfig};
use recipe_finder::models::{AuthMode, Theme};
use serial_test::serial;

const VARIABLES: &[&str] = &[
    "RECIPE_API_BASE_URL",
    "HTTP_TIMEOUT_SECS",
    "HTTP_CONNECT_TIMEOUT_SECS",
    "AUTH_PROVIDER",
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_RATINGS_TABLE",
    "FIREBASE_API_KEY",
    "FIREBASE_IDENTITY_URL",
    "FIREBASE_TOKEN_URL",
    "RECIPE_FINDER_DATA_DIR",
    "TRENDING_RECIPE_IDS",
    "FAVORITES_REQUIRE_SIGN_IN",
    "RECIPE_FINDER_THEME_DEFAULT",
];

fn clean_env() {
    init_test_logging();
    for key in VARIABLES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_any_variables() {
    clean_env();

    let config = AppConfig::from_env().unwrap();

    assert_eq!(config.auth, AuthConfig::Anonymous);
    assert_eq!(config.auth.mode(), AuthMode::Anonymous);
    assert!(config.recipe_api_base_url.starts_with("https://"));
    assert!(!config.trending_ids.is_empty());
    assert!(!config.favorites_require_sign_in);
    assert!(config.theme_default.is_none());
}

#[test]
#[serial]
fn test_data_dir_variable_and_cli_override() {
    clean_env();
    env::set_var("RECIPE_FINDER_DATA_DIR", "/tmp/recipes-env");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/tmp/recipes-env"));

    let overridden = config.with_data_dir(PathBuf::from("/tmp/recipes-cli"));
    assert_eq!(overridden.data_dir, PathBuf::from("/tmp/recipes-cli"));
    clean_env();
}

#[test]
#[serial]
fn test_invalid_recipe_url_names_the_variable() {
    clean_env();
    env::set_var("RECIPE_API_BASE_URL", "not a url");

    let error = AppConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("RECIPE_API_BASE_URL"));
    clean_env();
}

#[test]
#[serial]
fn test_firebase_inferred_from_api_key() {
    clean_env();
    env::set_var("FIREBASE_API_KEY", "web-key");
    env::set_var("FAVORITES_REQUIRE_SIGN_IN", "false");

    let config = AppConfig::from_env().unwrap();
    match &config.auth {
        AuthConfig::Firebase(firebase) => assert_eq!(firebase.api_key, "web-key"),
        other => panic!("expected firebase config, got {other:?}"),
    }
    assert_eq!(config.auth.mode(), AuthMode::ProviderBacked);
    assert!(!config.favorites_require_sign_in);
    clean_env();
}

#[test]
#[serial]
fn test_supabase_requires_anon_key() {
    clean_env();
    env::set_var("AUTH_PROVIDER", "supabase");
    env::set_var("SUPABASE_URL", "https://project.supabase.co");

    let error = AppConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("SUPABASE_ANON_KEY"));

    env::set_var("SUPABASE_ANON_KEY", "anon");
    let config = AppConfig::from_env().unwrap();
    assert!(matches!(config.auth, AuthConfig::Supabase(_)));
    assert!(config.favorites_require_sign_in);
    clean_env();
}

#[test]
#[serial]
fn test_theme_default_is_validated() {
    clean_env();
    env::set_var("RECIPE_FINDER_THEME_DEFAULT", "dark");
    assert_eq!(AppConfig::from_env().unwrap().theme_default, Some(Theme::Dark));

    env::set_var("RECIPE_FINDER_THEME_DEFAULT", "sepia");
    let error = AppConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("RECIPE_FINDER_THEME_DEFAULT"));
    clean_env();
}
