// ABOUTME: Plain-text rendering of a Screen for the terminal
// ABOUTME: Cards are numbered so commands can refer to them as #n

use std::fmt::Write as _;

use crate::models::{RecipeSummary, Theme};
use crate::view::{Content, DetailView, EmptyState, Screen};

const RULE_WIDTH: usize = 60;

fn rule(theme: Theme) -> String {
    match theme {
        Theme::Dark => "━".repeat(RULE_WIDTH),
        Theme::Light => "─".repeat(RULE_WIDTH),
    }
}

/// Header, button row and main panel
#[must_use]
pub fn render_screen(screen: &Screen, theme: Theme) -> String {
    let mut out = String::new();
    let favorites = &screen.favorites_button;
    let _ = write!(out, "Recipe Finder  [{} ({})]", favorites.label, favorites.count);
    if !favorites.enabled {
        out.push_str(" (sign in)");
    }
    if let Some(trending) = screen.trending_label {
        let _ = write!(out, "  [{trending}]");
    }
    match &screen.user {
        Some(user) => {
            let _ = write!(out, "  signed in as {user}");
        }
        None => out.push_str("  not signed in"),
    }
    let _ = writeln!(out, "  theme: {theme}");
    let _ = writeln!(out, "{}", rule(theme));

    match &screen.content {
        Content::Placeholder(text) | Content::Error(text) => {
            let _ = writeln!(out, "{text}");
        }
        Content::Loading => out.push_str("Loading...\n"),
        Content::Empty(EmptyState::NoResults { query }) => {
            let _ = writeln!(out, "No recipes found for \"{query}\". Try another search!");
        }
        Content::Empty(EmptyState::NoFavorites) => {
            out.push_str("No favorites yet. Open a recipe and use 'fav' to save it.\n");
        }
        Content::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}",
                    card_line(index + 1, card, screen.favorite_ids.contains(&card.id))
                );
            }
        }
    }

    if let Some(modal) = &screen.modal {
        out.push('\n');
        out.push_str(&render_modal(modal, theme));
    }
    out
}

fn card_line(position: usize, card: &RecipeSummary, favorited: bool) -> String {
    let heart = if favorited { " ♥" } else { "" };
    format!(
        "{position:>3}. {}{heart}  ({} · {})  id {}",
        card.name, card.category, card.cuisine, card.id
    )
}

/// Recipe detail block
#[must_use]
pub fn render_modal(modal: &DetailView, theme: Theme) -> String {
    let recipe = &modal.recipe;
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule(theme));
    let _ = writeln!(out, "{} (id {})", recipe.summary.name, recipe.id());
    let _ = writeln!(
        out,
        "Category: {}   Cuisine: {}",
        recipe.summary.category, recipe.summary.cuisine
    );
    if !recipe.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", recipe.tags.join(", "));
    }
    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient.display_line());
    }
    let _ = writeln!(out, "\nInstructions:\n{}", recipe.instructions.trim());
    if let Some(video) = &recipe.video_url {
        let _ = writeln!(out, "\nVideo: {video}");
    }

    let favorite = if modal.favorited { "♥ saved" } else { "♡ not saved" };
    let rating = match (modal.can_rate, modal.own_rating) {
        (false, _) => "sign in to rate".to_owned(),
        (true, Some(value)) => value.stars(),
        (true, None) => "not rated".to_owned(),
    };
    let _ = writeln!(
        out,
        "\nFavorite: {favorite}   Your rating: {rating}   Average: {}",
        modal.average_label
    );
    let _ = writeln!(out, "{}", rule(theme));
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::external::MockRecipeSource;
    use crate::view::{FavoritesButton, View};

    #[test]
    fn test_cards_are_numbered_and_marked() {
        let first = MockRecipeSource::recipe("1", "Arrabiata").summary();
        let second = MockRecipeSource::recipe("2", "Carbonara").summary();
        let screen = Screen {
            view: View::Search,
            content: Content::Cards(vec![first, second]),
            favorite_ids: HashSet::from(["2".to_owned()]),
            favorites_button: FavoritesButton {
                label: "Favorites",
                enabled: true,
                count: 1,
            },
            trending_label: None,
            user: None,
            modal: None,
        };

        let text = render_screen(&screen, Theme::Light);
        assert!(text.contains("  1. Arrabiata  ("));
        assert!(text.contains("  2. Carbonara ♥"));
        assert!(text.contains("[Favorites (1)]"));
        assert!(!text.contains("Trending"));
    }
}
