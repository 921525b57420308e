// ABOUTME: Utility module organization
// ABOUTME: Shared HTTP helpers used by every remote client

/// Shared HTTP client and response helpers
pub mod http_client;
