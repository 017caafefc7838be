//! Pricing service client

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::http::{join_url, record_lookup_failure, HttpClient, LookupError};
use crate::application::ports::PriceLookup;
use crate::domain::CarId;
use crate::shared::errors::InfraError;

/// Price as served by `GET /prices/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceQuote {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl PriceQuote {
    /// `"<currency> <amount>"` with two decimal places
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency, self.price)
    }
}

pub struct PricingClient {
    http: HttpClient,
    base_url: String,
}

impl PricingClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, InfraError> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_price(&self, vehicle_id: CarId) -> Result<Option<PriceQuote>, LookupError> {
        let url = join_url(&self.base_url, &format!("prices/{}", vehicle_id));
        self.http.get_json(&url).await
    }
}

#[async_trait]
impl PriceLookup for PricingClient {
    async fn get_price(&self, vehicle_id: CarId) -> Option<String> {
        match self.fetch_price(vehicle_id).await {
            Ok(Some(quote)) => Some(quote.display()),
            Ok(None) => {
                warn!(vehicle_id, "Pricing service has no price for vehicle");
                record_lookup_failure("price");
                None
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    vehicle_id,
                    timeout_ms = self.http.timeout_ms(),
                    "Pricing service did not answer in time"
                );
                record_lookup_failure("price");
                None
            }
            Err(e) => {
                warn!(vehicle_id, error = %e, "Price lookup failed");
                record_lookup_failure("price");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> PricingClient {
        PricingClient::new(server.uri(), 2000).unwrap()
    }

    #[tokio::test]
    async fn formats_currency_and_amount() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"currency": "USD", "price": 1234.56})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let price = client_for(&server).await.get_price(1).await;

        assert_eq!(price.as_deref(), Some("USD 1234.56"));
    }

    #[tokio::test]
    async fn whole_amounts_keep_two_decimals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices/3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"currency": "USD", "price": 15000.5})),
            )
            .mount(&server)
            .await;

        let price = client_for(&server).await.get_price(3).await;

        assert_eq!(price.as_deref(), Some("USD 15000.50"));
    }

    #[tokio::test]
    async fn unknown_vehicle_has_no_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        assert_eq!(client.fetch_price(99).await.unwrap(), None);
        assert_eq!(client.get_price(99).await, None);
    }

    #[tokio::test]
    async fn server_error_has_no_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        assert!(matches!(
            client.fetch_price(1).await,
            Err(LookupError::Status { .. })
        ));
        assert_eq!(client.get_price(1).await, None);
    }

    #[tokio::test]
    async fn malformed_body_has_no_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).await.get_price(1).await, None);
    }

    #[tokio::test]
    async fn slow_service_times_out_without_a_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"currency": "USD", "price": 1234.56}))
                    .set_delay(Duration::from_millis(1000)),
            )
            .mount(&server)
            .await;

        let client = PricingClient::new(server.uri(), 100).unwrap();

        assert!(client.fetch_price(1).await.unwrap_err().is_timeout());
        assert_eq!(client.get_price(1).await, None);
    }

    #[tokio::test]
    async fn unreachable_service_has_no_price() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = PricingClient::new("http://127.0.0.1:9", 500).unwrap();
        assert_eq!(client.get_price(1).await, None);
    }
}
