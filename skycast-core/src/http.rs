use std::time::Duration;

use anyhow::Context;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::{error::FetchError, provider::Service};

pub use reqwest::Client;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared HTTP client; every request made through it is bounded by `timeout`.
pub fn client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Send `request` and decode a successful JSON body into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    service: Service,
    request: RequestBuilder,
) -> Result<T, FetchError> {
    // URLs may carry an API key; keep them out of error messages.
    let res = request
        .send()
        .await
        .map_err(|e| FetchError::Http { service, source: e.without_url() })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| FetchError::Http { service, source: e.without_url() })?;

    if !status.is_success() {
        return Err(FetchError::Status { service, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| FetchError::Parse { service, source })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("Bad API key"), "Bad API key");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "°".repeat(300);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let http = client(Duration::from_secs(2)).expect("client");
        let err = get_json::<serde_json::Value>(Service::OpenMeteo, http.get("http://127.0.0.1:9/"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Http { service: Service::OpenMeteo, .. }));
    }
}
