// ABOUTME: Core types and constants for the Recipe Finder client
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the Recipe Finder
//! client. It carries no I/O so it changes infrequently and compiles once for
//! the whole workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Recipes, ratings, sessions and the theme preference
//! - **constants**: Storage keys, default endpoints and UI copy

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (recipes, ratings, sessions, theme)
pub mod models;

/// Application constants organized by domain
pub mod constants;
