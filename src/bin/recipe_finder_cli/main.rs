// ABOUTME: Recipe Finder CLI - interactive recipe browser plus one-shot commands
// ABOUTME: Search, view, favorite, rate and manage the account and theme from the terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
//!
//! Usage:
//! ```bash
//! # Interactive browser (default)
//! recipe-finder
//!
//! # Search once and print the cards
//! recipe-finder search chicken curry
//!
//! # Show one recipe
//! recipe-finder show 52771
//!
//! # Favorites
//! recipe-finder favorites list
//! recipe-finder favorites toggle 52771
//!
//! # Accounts (Supabase or Firebase configured through the environment)
//! recipe-finder auth signin --email cook@example.com --password secret
//! recipe-finder rate 52771 4
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recipe_finder::{
    config::AppConfig, context::ServiceContext, errors::AppResult, logging::LoggingConfig,
};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "recipe-finder",
    version,
    about = "Search TheMealDB recipes from the terminal",
    long_about = "Browse recipes, keep favorites, rate recipes and follow trending dishes. \
                  Runs an interactive browser when no command is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory for local favorites, theme and session documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Interactive browser
    Interactive,

    /// Search recipes by name
    Search {
        /// Search words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show one recipe with ingredients and instructions
    Show {
        /// Recipe id
        id: String,
    },

    /// Favorites management
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Show trending recipes
    Trending,

    /// Rate a recipe from 1 to 5 stars
    Rate {
        /// Recipe id
        id: String,

        /// Stars, 1-5
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Account commands
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },

    /// Display theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FavoritesCommand {
    /// List saved favorites
    List,

    /// Add or remove a recipe
    Toggle {
        /// Recipe id
        id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AuthCommand {
    /// Create an account
    Signup {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign in and remember the session
    Signin {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the session
    Signout,

    /// Show the current session
    Status,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Show,

    /// Set the theme
    Set {
        /// `dark` or `light`
        theme: String,
    },

    /// Switch between dark and light
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    let services = ServiceContext::from_config(&config).await?;
    debug!(data_dir = %config.data_dir.display(), "Starting command");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => commands::interactive::run(&services).await?,
        Command::Search { query } => commands::recipes::search(&services, &query.join(" ")).await?,
        Command::Show { id } => commands::recipes::show(&services, &id).await?,
        Command::Favorites { action } => match action {
            FavoritesCommand::List => commands::favorites::list(&services)?,
            FavoritesCommand::Toggle { id } => commands::favorites::toggle(&services, &id).await?,
        },
        Command::Trending => commands::recipes::trending(&services).await?,
        Command::Rate { id, value } => commands::recipes::rate(&services, &id, value).await?,
        Command::Auth { action } => match action {
            AuthCommand::Signup { email, password } => {
                commands::account::sign_up(&services, &email, &password).await?;
            }
            AuthCommand::Signin { email, password } => {
                commands::account::sign_in(&services, &email, &password).await?;
            }
            AuthCommand::Signout => commands::account::sign_out(&services).await?,
            AuthCommand::Status => commands::account::status(&services),
        },
        Command::Theme { action } => match action {
            ThemeCommand::Show => commands::theme::show(&services)?,
            ThemeCommand::Set { theme } => commands::theme::set(&services, &theme)?,
            ThemeCommand::Toggle => commands::theme::toggle(&services)?,
        },
    }

    Ok(())
}
