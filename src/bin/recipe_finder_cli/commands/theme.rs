// ABOUTME: Theme commands for recipe-finder
// ABOUTME: Shows, sets and toggles the stored dark/light preference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{context::ServiceContext, errors::AppResult, models::Theme};

type Result<T> = AppResult<T>;

/// Print the current theme
pub fn show(services: &ServiceContext) -> Result<()> {
    println!("{}", services.theme().current()?);
    Ok(())
}

/// Store a theme given as `dark` or `light`
pub fn set(services: &ServiceContext, raw: &str) -> Result<()> {
    let theme: Theme = raw.parse()?;
    services.theme().set(theme)?;
    println!("Theme set to {theme}");
    Ok(())
}

/// Flip the stored theme
pub fn toggle(services: &ServiceContext) -> Result<()> {
    let theme = services.theme().toggle()?;
    println!("Theme set to {theme}");
    Ok(())
}
