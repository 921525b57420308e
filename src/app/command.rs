// ABOUTME: Interactive command grammar for the REPL
// ABOUTME: Parses one input line into a Command; parse errors carry a user-facing message

use std::str::FromStr;

use crate::errors::AppError;
use crate::models::Theme;

/// A recipe named by id or by its position in the displayed cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeRef {
    /// Recipe id, e.g. `52771`
    Id(String),
    /// 1-based card number, written `#2`
    Card(usize),
}

impl FromStr for RecipeRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(position) = s.strip_prefix('#') {
            return position
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Self::Card)
                .ok_or_else(|| AppError::invalid_input(format!("Not a card number: {s}")));
        }
        if s.is_empty() {
            return Err(AppError::invalid_input("Recipe id is required"));
        }
        Ok(Self::Id(s.to_owned()))
    }
}

/// Theme sub-command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Flip dark/light
    Toggle,
    /// Set explicitly
    Set(Theme),
}

/// One REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `search <query>`; the query may be blank, which the controller rejects
    Search(String),
    /// `open <id|#n>`
    Open(RecipeRef),
    /// `close`
    Close,
    /// `fav [id|#n]`; without an argument acts on the open recipe
    Fav(Option<RecipeRef>),
    /// `favorites`
    Favorites,
    /// `trending`
    Trending,
    /// `rate <1-5>` on the open recipe
    Rate(i64),
    /// `signup <email> <password>`
    SignUp {
        /// Email
        email: String,
        /// Password
        password: String,
    },
    /// `signin <email> <password>`
    SignIn {
        /// Email
        email: String,
        /// Password
        password: String,
    },
    /// `signout`
    SignOut,
    /// `theme [dark|light|toggle]`
    Theme(ThemeAction),
    /// `help`
    Help,
    /// `quit`
    Quit,
}

/// Help text printed by `help`
pub const HELP: &str = "\
Commands:
  search <query>            search recipes by name
  open <id|#n>              show a recipe
  close                     close the open recipe
  fav [id|#n]               toggle favorite (open recipe by default)
  favorites                 switch between favorites and search
  trending                  switch between trending and search
  rate <1-5>                rate the open recipe
  signup <email> <password> create an account
  signin <email> <password> sign in
  signout                   sign out
  theme [dark|light|toggle] show or change the theme
  help                      show this help
  quit                      exit";

fn credentials(rest: &str) -> Result<(String, String), AppError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(email), Some(password), None) => Ok((email.to_owned(), password.to_owned())),
        _ => Err(AppError::invalid_input("Usage: <email> <password>")),
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_owned())),
            "open" | "o" => rest.parse().map(Self::Open),
            "close" | "c" => Ok(Self::Close),
            "fav" | "f" => {
                if rest.is_empty() {
                    Ok(Self::Fav(None))
                } else {
                    rest.parse().map(|target| Self::Fav(Some(target)))
                }
            }
            "favorites" => Ok(Self::Favorites),
            "trending" => Ok(Self::Trending),
            "rate" | "r" => rest
                .parse()
                .map(Self::Rate)
                .map_err(|_| AppError::invalid_input("Usage: rate <1-5>")),
            "signup" => credentials(rest).map(|(email, password)| Self::SignUp { email, password }),
            "signin" | "login" => {
                credentials(rest).map(|(email, password)| Self::SignIn { email, password })
            }
            "signout" | "logout" => Ok(Self::SignOut),
            "theme" => match rest {
                "" => Ok(Self::Theme(ThemeAction::Show)),
                "toggle" => Ok(Self::Theme(ThemeAction::Toggle)),
                other => other.parse().map(|theme| Self::Theme(ThemeAction::Set(theme))),
            },
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err(AppError::invalid_input("Type 'help' for commands")),
            other => Err(AppError::invalid_input(format!(
                "Unknown command '{other}'. Type 'help' for commands"
            ))),
        }
    }
}
