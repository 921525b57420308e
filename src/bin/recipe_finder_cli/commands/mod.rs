// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
// ABOUTME: Re-exports command modules for recipe-finder
// ABOUTME: Provides the interactive browser and one-shot recipe, favorites, account and theme commands

pub mod account;
pub mod favorites;
pub mod interactive;
pub mod recipes;
pub mod theme;
