//! Shared HTTP plumbing for the remote services.

use std::time::Duration;

use polychat_core::PolychatError;
use polychat_core::config::HttpSettings;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Builds a client whose every request is bounded by the configured timeout.
pub fn build_client(settings: &HttpSettings) -> Result<Client, PolychatError> {
    Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|err| PolychatError::internal(format!("Failed to build HTTP client: {err}")))
}

/// Sends a GET request and decodes a JSON body, mapping every failure mode
/// into a `PolychatError` tagged with `service`.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    service: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, PolychatError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|err| map_transport_error(service, err))?;

    let response = ensure_success(service, response).await?;

    response
        .json::<T>()
        .await
        .map_err(|err| PolychatError::parse(service, err.to_string()))
}

async fn ensure_success(service: &str, response: Response) -> Result<Response, PolychatError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| format!("Failed to read {service} error body"));
    Err(PolychatError::http(service, status.as_u16(), truncate(&body, 200)))
}

fn map_transport_error(service: &str, err: reqwest::Error) -> PolychatError {
    let message = if err.is_timeout() {
        format!("timed out: {err}")
    } else {
        err.to_string()
    };
    PolychatError::transport(service, message)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
