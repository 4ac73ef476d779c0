//! Shared HTTP plumbing for the API clients
//!
//! One `reqwest::Client` is built at startup from the configuration and
//! cloned into each API client. The helpers here turn transport failures,
//! unexpected status codes and undecodable bodies into [`ApiError`]s.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::{ApiError, ApiResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Formats the User-Agent header: `Name/Version (+ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.client_name, config.client_version, config.contact_email
    )
}

/// Builds the HTTP client shared by all API clients
///
/// # Example
///
/// ```no_run
/// use org_audit::config::{HttpConfig, UserAgentConfig};
/// use org_audit::http::build_http_client;
///
/// let agent = UserAgentConfig {
///     client_name: "org-audit".to_string(),
///     client_version: "1.0".to_string(),
///     contact_email: "admin@example.org".to_string(),
/// };
///
/// let client = build_http_client(&agent, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(agent))
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a request, mapping transport errors to `ApiError::Request`
pub async fn send(url: &str, request: RequestBuilder) -> ApiResult<Response> {
    request.send().await.map_err(|source| ApiError::Request {
        url: url.to_string(),
        source,
    })
}

/// Fails with `ApiError::Status` unless the response is a 2xx
pub fn ensure_success(url: &str, response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Reads the body as text
pub async fn read_text(url: &str, response: Response) -> ApiResult<String> {
    response.text().await.map_err(|source| ApiError::Request {
        url: url.to_string(),
        source,
    })
}

/// Reads and decodes a JSON body
pub async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> ApiResult<T> {
    let body = read_text(url, response).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Joins an API base URL and a path without doubling the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
