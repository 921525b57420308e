// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Provides the shared client plus helpers for checking responses from remote services

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;

use crate::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::errors::{AppError, AppResult};

/// Global shared HTTP client with default configuration
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client with default settings
///
/// This client uses connection pooling and reasonable timeouts.
/// Prefer this over creating new clients for better performance.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        create_client_with_timeout(DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
    })
}

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request, mapping transport failures to `ExternalServiceUnavailable`
///
/// # Errors
///
/// Returns an error if the request could not be sent
pub async fn send(service: &str, request: reqwest::RequestBuilder) -> AppResult<Response> {
    request.send().await.map_err(|e| {
        debug!(service, error = %e, "HTTP request failed");
        AppError::external_unavailable(service, e.to_string())
    })
}

/// Fail on a non-2xx status, reporting the status and body
///
/// # Errors
///
/// Returns `ExternalServiceError` for any non-success status
pub async fn ensure_success(service: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::external_service(
        service,
        format!("HTTP {status}: {body}"),
    ))
}

/// Decode a JSON body, reporting parse failures against the service
///
/// # Errors
///
/// Returns `ExternalServiceError` when the body is not the expected JSON
pub async fn json_body<T: serde::de::DeserializeOwned>(
    service: &str,
    response: Response,
) -> AppResult<T> {
    response
        .json()
        .await
        .map_err(|e| AppError::external_service(service, format!("JSON parse error: {e}")))
}

/// Join a base URL and a relative path with exactly one slash
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.test/api/", "/search.php"),
            "https://example.test/api/search.php"
        );
        assert_eq!(join_url("http://a", "b/c"), "http://a/b/c");
    }
}
