// ABOUTME: Configuration module organization
// ABOUTME: Environment-only configuration, there is no config file

/// Environment-based configuration loading
pub mod environment;

pub use environment::{AppConfig, AuthConfig, AuthProviderKind, FirebaseConfig, HttpConfig, SupabaseConfig};
