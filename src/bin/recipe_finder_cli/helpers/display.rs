// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
// ABOUTME: Output formatting helpers for recipe-finder
// ABOUTME: Provides consistent display functions for screens, recipes and account state

use recipe_finder::app::render::{render_modal, render_screen};
use recipe_finder::models::{AuthMode, AuthUser, RatingValue, Session, Theme};
use recipe_finder::view::Screen;

/// Print the main panel of a screen
pub fn display_screen(screen: &Screen, theme: Theme) {
    print!("{}", render_screen(screen, theme));
}

/// Print the open recipe, if any
pub fn display_recipe(screen: &Screen, theme: Theme) {
    if let Some(modal) = &screen.modal {
        print!("{}", render_modal(modal, theme));
    }
}

/// Confirm a rating write
pub fn display_rating(meal_id: &str, stored: Option<RatingValue>) {
    match stored {
        Some(value) => println!("Rated recipe {meal_id}: {} ({value}/5)", value.stars()),
        None => println!("Rating for recipe {meal_id} saved, but it could not be read back yet"),
    }
}

/// Confirm a favorites toggle
pub fn display_favorite_toggled(name: &str, favorited: bool) {
    if favorited {
        println!("Saved \"{name}\" to favorites");
    } else {
        println!("Removed \"{name}\" from favorites");
    }
}

fn user_label(user: &AuthUser) -> &str {
    user.email.as_deref().unwrap_or(&user.id)
}

/// Result of a sign-up
pub fn display_sign_up(user: &AuthUser, signed_in: bool) {
    println!("\nAccount created for {}", user_label(user));
    if signed_in {
        println!("You are now signed in.");
    } else {
        println!("Check your email to confirm the account, then run `recipe-finder auth signin`.");
    }
}

/// Result of a sign-in
pub fn display_sign_in(user: &AuthUser) {
    println!("Signed in as {}", user_label(user));
}

/// Current auth state
pub fn display_status(mode: AuthMode, session: Option<&Session>) {
    match (mode, session) {
        (AuthMode::Anonymous, _) => {
            println!("Accounts are not configured; favorites are stored locally.");
        }
        (AuthMode::ProviderBacked, None) => println!("Not signed in"),
        (AuthMode::ProviderBacked, Some(session)) => {
            println!("Signed in as {}", session.display_name());
            println!("   User ID: {}", session.user_id());
            match session.expires_at {
                Some(expires) => println!("   Expires: {}", expires.format("%Y-%m-%d %H:%M UTC")),
                None => println!("   Expires: Never"),
            }
        }
    }
}
