//! # HTTP Client Utilities
//!
//! Thin reqwest wrapper shared by the lookup clients: one timeout for every
//! request, JSON decoding, and a 404 reported as "no value" rather than an
//! error.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::errors::InfraError;

/// Why a lookup produced no value
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl LookupError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns `InfraError::Http` if the TLS backend cannot be initialised.
    pub fn new(timeout_ms: u64) -> Result<Self, InfraError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self { client, timeout_ms })
    }

    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// GET `url` and decode the JSON body. `Ok(None)` on 404.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, LookupError> {
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// GET `url` with query parameters and decode the JSON body. `Ok(None)` on 404.
    pub async fn get_json_with_params<T, P>(
        &self,
        url: &str,
        params: &P,
    ) -> Result<Option<T>, LookupError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.client.get(url).query(params).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, LookupError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        Ok(Some(response.json::<T>().await?))
    }
}

/// Count a lookup that left its field empty.
pub fn record_lookup_failure(lookup: &'static str) {
    metrics::counter!("vehicles_enrichment_failures_total", "lookup" => lookup).increment(1);
}

/// Join a configured base URL and a path without doubling slashes.
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
    fn new_client_keeps_timeout() {
        let client = HttpClient::new(1500).unwrap();
        assert_eq!(client.timeout_ms(), 1500);
    }

    #[test]
    fn join_url_normalises_slashes() {
        assert_eq!(join_url("http://host:8082/", "/prices/1"), "http://host:8082/prices/1");
        assert_eq!(join_url("http://host:8082", "prices/1"), "http://host:8082/prices/1");
    }
}
