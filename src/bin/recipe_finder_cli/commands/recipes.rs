// ABOUTME: One-shot recipe commands for recipe-finder
// ABOUTME: Handles search, show, trending and rate through the view controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{context::ServiceContext, errors::AppResult};
use tracing::info;

use crate::helpers::display::{display_rating, display_recipe, display_screen};

type Result<T> = AppResult<T>;

/// Search and print the result cards
pub async fn search(services: &ServiceContext, query: &str) -> Result<()> {
    let mut controller = services.controller();
    controller.search(query).await?;
    display_screen(&controller.screen()?, services.theme().current()?);
    Ok(())
}

/// Print one recipe in full
pub async fn show(services: &ServiceContext, id: &str) -> Result<()> {
    let mut controller = services.controller();
    controller.open_recipe(id).await?;
    display_recipe(&controller.screen()?, services.theme().current()?);
    Ok(())
}

/// Load and print the trending list
pub async fn trending(services: &ServiceContext) -> Result<()> {
    let mut controller = services.controller();
    controller.trending().await?;
    display_screen(&controller.screen()?, services.theme().current()?);
    Ok(())
}

/// Rate a recipe as the signed-in user
pub async fn rate(services: &ServiceContext, id: &str, value: i64) -> Result<()> {
    let mut controller = services.controller();
    controller.check_rating(value)?;
    controller.open_recipe(id).await?;
    let stored = controller.rate(value).await?;
    info!(recipe_id = id, value, "Rating command finished");
    display_rating(id, stored);
    Ok(())
}
