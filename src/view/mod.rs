// ABOUTME: View layer: controller, state and the Screen description it renders
// ABOUTME: All transitions between Search, Favorites and Trending go through ViewController

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # View
//!
//! [`ViewController`] is the only writer of [`AppState`]. Long-running work
//! (searches, trending loads) is split into a synchronous `begin_*` call that
//! issues a ticket and a `complete_*` call that applies the result. Each
//! ticket carries a monotonically increasing request id; a completion whose
//! id is no longer the latest is dropped, so a slow early search can never
//! overwrite a later one.

/// View controller
pub mod controller;
/// State and screen types
pub mod state;

pub use controller::{SearchTicket, TrendingTicket, ViewController, ViewSettings};
pub use state::{
    AppState, Content, DetailView, EmptyState, FavoritesButton, ModalState, Screen, View,
};
