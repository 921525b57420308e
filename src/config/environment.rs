// ABOUTME: Environment configuration management for the recipe client
// ABOUTME: Parses endpoints, auth provider credentials, storage location and view options

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Environment-based configuration
//!
//! There is no configuration file: every setting comes from the process
//! environment, with defaults that talk to the public TheMealDB API and run
//! without accounts.
//!
//! | Variable | Default |
//! |---|---|
//! | `RECIPE_API_BASE_URL` | TheMealDB v1 test key |
//! | `HTTP_TIMEOUT_SECS` / `HTTP_CONNECT_TIMEOUT_SECS` | 30 / 10 |
//! | `AUTH_PROVIDER` | inferred: `supabase`, `firebase` or `none` |
//! | `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_RATINGS_TABLE` | -, -, `ratings` |
//! | `FIREBASE_API_KEY`, `FIREBASE_IDENTITY_URL`, `FIREBASE_TOKEN_URL` | -, Google endpoints |
//! | `RECIPE_FINDER_DATA_DIR` | platform data dir + `recipe-finder` |
//! | `TRENDING_RECIPE_IDS` | built-in list |
//! | `FAVORITES_REQUIRE_SIGN_IN` | `true` with an auth provider |
//! | `RECIPE_FINDER_THEME_DEFAULT` | terminal hint |

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};
use url::Url;

use crate::constants::{endpoints, http, ratings, service_names, trending};
use crate::models::{AuthMode, Theme};

/// Which identity provider backs accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProviderKind {
    /// No accounts
    None,
    /// Supabase GoTrue + PostgREST
    Supabase,
    /// Firebase Identity Toolkit
    Firebase,
}

impl AuthProviderKind {
    /// Parse the `AUTH_PROVIDER` value
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider name
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" | "anonymous" | "" => Ok(Self::None),
            "supabase" => Ok(Self::Supabase),
            "firebase" => Ok(Self::Firebase),
            other => bail!("AUTH_PROVIDER must be none, supabase or firebase, got '{other}'"),
        }
    }
}

/// HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Supabase project settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
    /// Table holding `(meal_id, user_id, rating)` rows
    pub ratings_table: String,
}

/// Firebase project settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    /// Web API key
    pub api_key: String,
    /// Identity Toolkit base URL
    pub identity_url: String,
    /// Secure Token base URL
    pub token_url: String,
}

/// Auth backend selection with its credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// No accounts
    Anonymous,
    /// Supabase-backed accounts and ratings
    Supabase(SupabaseConfig),
    /// Firebase-backed accounts, ratings kept locally
    Firebase(FirebaseConfig),
}

impl AuthConfig {
    /// Capability offered by this configuration
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        match self {
            Self::Anonymous => AuthMode::Anonymous,
            Self::Supabase(_) | Self::Firebase(_) => AuthMode::ProviderBacked,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Recipe API base URL
    pub recipe_api_base_url: String,
    /// HTTP timeouts
    pub http: HttpConfig,
    /// Auth backend
    pub auth: AuthConfig,
    /// Directory for local storage documents
    pub data_dir: PathBuf,
    /// Recipe ids shown by the trending view
    pub trending_ids: Vec<String>,
    /// Whether favorites need a session (provider-backed mode only)
    pub favorites_require_sign_in: bool,
    /// Theme used when none is stored; `None` defers to the terminal hint
    pub theme_default: Option<Theme>,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable when a value is invalid
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            recipe_api = %config.recipe_api_base_url,
            auth_mode = ?config.auth.mode(),
            data_dir = %config.data_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable when a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let recipe_api_base_url = non_empty("RECIPE_API_BASE_URL")
            .unwrap_or_else(|| endpoints::MEAL_DB_BASE_URL.to_owned());
        validate_url("RECIPE_API_BASE_URL", &recipe_api_base_url)?;

        let http = HttpConfig {
            timeout_secs: parse_or("HTTP_TIMEOUT_SECS", non_empty("HTTP_TIMEOUT_SECS"), http::DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_or(
                "HTTP_CONNECT_TIMEOUT_SECS",
                non_empty("HTTP_CONNECT_TIMEOUT_SECS"),
                http::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let auth = load_auth(&non_empty)?;

        let data_dir = match non_empty("RECIPE_FINDER_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        let trending_ids = non_empty("TRENDING_RECIPE_IDS").map_or_else(
            || {
                trending::DEFAULT_RECIPE_IDS
                    .iter()
                    .map(|id| (*id).to_owned())
                    .collect()
            },
            |raw| parse_id_list(&raw),
        );
        if trending_ids.is_empty() {
            bail!("TRENDING_RECIPE_IDS must list at least one recipe id");
        }

        let favorites_require_sign_in = match auth.mode() {
            AuthMode::Anonymous => false,
            AuthMode::ProviderBacked => {
                parse_or("FAVORITES_REQUIRE_SIGN_IN", non_empty("FAVORITES_REQUIRE_SIGN_IN"), true)?
            }
        };

        let theme_default = non_empty("RECIPE_FINDER_THEME_DEFAULT")
            .map(|raw| {
                raw.parse::<Theme>()
                    .map_err(|e| anyhow!("RECIPE_FINDER_THEME_DEFAULT: {}", e.user_message()))
            })
            .transpose()?;

        Ok(Self {
            recipe_api_base_url,
            http,
            auth,
            data_dir,
            trending_ids,
            favorites_require_sign_in,
            theme_default,
        })
    }

    /// Override the storage directory (CLI `--data-dir`)
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }
}

fn load_auth<F>(non_empty: &F) -> Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let supabase_url = non_empty("SUPABASE_URL");
    let firebase_key = non_empty("FIREBASE_API_KEY");

    let kind = match non_empty("AUTH_PROVIDER") {
        Some(raw) => AuthProviderKind::parse(&raw)?,
        None if supabase_url.is_some() => AuthProviderKind::Supabase,
        None if firebase_key.is_some() => AuthProviderKind::Firebase,
        None => AuthProviderKind::None,
    };

    match kind {
        AuthProviderKind::None => Ok(AuthConfig::Anonymous),
        AuthProviderKind::Supabase => {
            let url = supabase_url.context("SUPABASE_URL is required when AUTH_PROVIDER=supabase")?;
            validate_url("SUPABASE_URL", &url)?;
            let anon_key = non_empty("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY is required when AUTH_PROVIDER=supabase")?;
            let ratings_table = non_empty("SUPABASE_RATINGS_TABLE")
                .unwrap_or_else(|| ratings::DEFAULT_TABLE.to_owned());
            info!(service = service_names::SUPABASE_AUTH, "Accounts enabled");
            Ok(AuthConfig::Supabase(SupabaseConfig {
                url,
                anon_key,
                ratings_table,
            }))
        }
        AuthProviderKind::Firebase => {
            let api_key =
                firebase_key.context("FIREBASE_API_KEY is required when AUTH_PROVIDER=firebase")?;
            let identity_url = non_empty("FIREBASE_IDENTITY_URL")
                .unwrap_or_else(|| endpoints::FIREBASE_IDENTITY_URL.to_owned());
            let token_url = non_empty("FIREBASE_TOKEN_URL")
                .unwrap_or_else(|| endpoints::FIREBASE_TOKEN_URL.to_owned());
            validate_url("FIREBASE_IDENTITY_URL", &identity_url)?;
            validate_url("FIREBASE_TOKEN_URL", &token_url)?;
            info!(service = service_names::FIREBASE_AUTH, "Accounts enabled");
            Ok(AuthConfig::Firebase(FirebaseConfig {
                api_key,
                identity_url,
                token_url,
            }))
        }
    }
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{key} is not a valid URL: '{value}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must use http or https, got '{}'", url.scheme());
    }
    Ok(())
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has invalid value '{value}': {e}"))
    })
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || {
            warn!("No platform data directory found, using ./.recipe-finder");
            PathBuf::from(".recipe-finder")
        },
        |dir| dir.join(service_names::RECIPE_FINDER),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_anonymous() {
        let config = AppConfig::from_lookup(lookup(&[("RECIPE_FINDER_DATA_DIR", "/tmp/rf")])).unwrap();
        assert_eq!(config.auth, AuthConfig::Anonymous);
        assert_eq!(config.recipe_api_base_url, endpoints::MEAL_DB_BASE_URL);
        assert!(!config.favorites_require_sign_in);
        assert_eq!(config.trending_ids.len(), trending::DEFAULT_RECIPE_IDS.len());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/rf"));
    }

    #[test]
    fn test_supabase_inferred_from_url() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        match config.auth {
            AuthConfig::Supabase(supabase) => {
                assert_eq!(supabase.ratings_table, "ratings");
                assert_eq!(supabase.anon_key, "anon");
            }
            other => panic!("expected supabase, got {other:?}"),
        }
        assert!(config.favorites_require_sign_in);
    }

    #[test]
    fn test_missing_anon_key_names_variable() {
        let error = AppConfig::from_lookup(lookup(&[
            ("AUTH_PROVIDER", "supabase"),
            ("SUPABASE_URL", "https://project.supabase.co"),
        ]))
        .unwrap_err();
        assert!(error.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_invalid_timeout_names_variable() {
        let error = AppConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(error.to_string().contains("HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_trending_ids_override() {
        let config =
            AppConfig::from_lookup(lookup(&[("TRENDING_RECIPE_IDS", " 1, 2 ,,3")])).unwrap();
        assert_eq!(config.trending_ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(AuthProviderKind::parse("auth0").is_err());
        assert_eq!(
            AuthProviderKind::parse("Firebase").unwrap(),
            AuthProviderKind::Firebase
        );
    }
}
