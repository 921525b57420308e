// ABOUTME: Favorites commands for recipe-finder
// ABOUTME: Lists saved favorites and toggles a recipe by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{context::ServiceContext, errors::AppResult, external::RecipeSource};

use crate::helpers::display::{display_favorite_toggled, display_screen};

type Result<T> = AppResult<T>;

/// Print saved favorites
pub fn list(services: &ServiceContext) -> Result<()> {
    let mut controller = services.controller();
    controller.toggle_favorites_view()?;
    display_screen(&controller.screen()?, services.theme().current()?);
    Ok(())
}

/// Add or remove a recipe; removal works from the stored summary without a lookup
pub async fn toggle(services: &ServiceContext, id: &str) -> Result<()> {
    let mut controller = services.controller();
    controller.ensure_favorites_available()?;

    let stored = services
        .favorites()
        .list()?
        .into_iter()
        .find(|recipe| recipe.id == id);
    let summary = match stored {
        Some(summary) => summary,
        None => services.recipes().lookup(id).await?.summary(),
    };

    let favorited = controller.toggle_favorite_recipe(&summary)?;
    display_favorite_toggled(&summary.name, favorited);
    Ok(())
}
