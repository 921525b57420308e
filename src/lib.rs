// ABOUTME: Main library entry point for the Recipe Finder client
// ABOUTME: Recipe search, favorites, ratings, trending and account sessions behind one view controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![deny(unsafe_code)]

//! # Recipe Finder
//!
//! A recipe search client for TheMealDB. It renders result cards, opens a
//! detail view, keeps favorites in local storage, lets signed-in users rate
//! recipes and shows a trending list.
//!
//! ## Architecture
//!
//! - **External**: the recipe API client (`external::meal_db_client`)
//! - **Storage**: local key-value documents (`storage`)
//! - **Favorites / Ratings / Theme**: small stores over storage or a backend
//! - **Auth**: one `AuthSessionAdapter` capability, anonymous or provider-backed
//! - **View**: the `ViewController` owning all UI state
//! - **App**: the single-threaded event loop used by the interactive CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_finder::config::environment::AppConfig;
//! use recipe_finder::context::ServiceContext;
//! use recipe_finder::errors::AppResult;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let services = ServiceContext::from_config(&config).await?;
//!     let mut controller = services.controller();
//!
//!     controller.search("arrabiata").await?;
//!     println!("{:?}", controller.screen()?.content);
//!     Ok(())
//! }
//! ```

/// Interactive event loop, command parsing and text rendering
pub mod app;

/// Identity providers and the session adapter
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Wiring of services from configuration
pub mod context;

/// External API clients (TheMealDB)
pub mod external;

/// Favorited recipe summaries in local storage
pub mod favorites;

/// Structured logging setup
pub mod logging;

/// Star ratings and their backends
pub mod ratings;

/// Local key-value storage
pub mod storage;

/// Dark/light theme preference
pub mod theme;

/// Utility functions and helpers
pub mod utils;

/// View state and transitions
pub mod view;

// Re-export foundation modules from the core crate
pub use recipe_core::{constants, errors, models};
