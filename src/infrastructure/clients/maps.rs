//! Reverse geocoding: coordinates to street address

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::http::{join_url, record_lookup_failure, HttpClient, LookupError};
use crate::application::ports::LocationLookup;
use crate::domain::{Address, Location};
use crate::shared::errors::InfraError;

/// Body of `GET /maps?lat=..&lon=..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<AddressResponse> for Address {
    fn from(r: AddressResponse) -> Self {
        Address {
            address: r.address,
            city: r.city,
            state: r.state,
            zip: r.zip,
        }
    }
}

/// Client for an external maps service
pub struct MapsClient {
    http: HttpClient,
    base_url: String,
}

impl MapsClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, InfraError> {
        Ok(Self {
            http: HttpClient::new(timeout_ms)?,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_address(&self, lat: f64, lon: f64) -> Result<Option<AddressResponse>, LookupError> {
        let url = join_url(&self.base_url, "maps");
        self.http
            .get_json_with_params(&url, &[("lat", lat), ("lon", lon)])
            .await
    }
}

#[async_trait]
impl LocationLookup for MapsClient {
    async fn get_address(&self, location: &Location) -> Option<Address> {
        match self.fetch_address(location.lat, location.lon).await {
            Ok(Some(body)) => Some(body.into()),
            Ok(None) => {
                warn!(lat = location.lat, lon = location.lon, "Maps service has no address for location");
                record_lookup_failure("location");
                None
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    lat = location.lat,
                    lon = location.lon,
                    timeout_ms = self.http.timeout_ms(),
                    "Maps service did not answer in time"
                );
                record_lookup_failure("location");
                None
            }
            Err(e) => {
                warn!(lat = location.lat, lon = location.lon, error = %e, "Address lookup failed");
                record_lookup_failure("location");
                None
            }
        }
    }
}

/// Answers every lookup with the same address. Used when no maps service
/// is deployed.
pub struct FixedAddressLookup {
    address: Address,
}

impl FixedAddressLookup {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl Default for FixedAddressLookup {
    fn default() -> Self {
        Self::new(Address {
            address: Some("374 William S Canning Blvd".into()),
            city: Some("Fall River".into()),
            state: Some("MA".into()),
            zip: Some("2721".into()),
        })
    }
}

#[async_trait]
impl LocationLookup for FixedAddressLookup {
    async fn get_address(&self, _location: &Location) -> Option<Address> {
        Some(self.address.clone())
    }
}

/// Never finds an address
pub struct NoAddressLookup;

#[async_trait]
impl LocationLookup for NoAddressLookup {
    async fn get_address(&self, _location: &Location) -> Option<Address> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn resolves_address_from_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps"))
            .and(query_param("lat", "40.73061"))
            .and(query_param("lon", "-73.935242"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": "374 William S Canning Blvd",
                "city": "Fall River",
                "state": "MA",
                "zip": "2721"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 2000).unwrap();
        let address = client
            .get_address(&Location::new(40.730610, -73.935242))
            .await
            .unwrap();

        assert_eq!(address.city.as_deref(), Some("Fall River"));
        assert_eq!(address.zip.as_deref(), Some("2721"));
    }

    #[tokio::test]
    async fn missing_fields_stay_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Boston"})))
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 2000).unwrap();
        let address = client.get_address(&Location::new(1.0, 2.0)).await.unwrap();

        assert_eq!(address.city.as_deref(), Some("Boston"));
        assert_eq!(address.address, None);
    }

    #[tokio::test]
    async fn service_error_yields_no_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 2000).unwrap();
        assert_eq!(client.get_address(&Location::new(1.0, 2.0)).await, None);
    }

    #[tokio::test]
    async fn slow_service_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"city": "Boston"}))
                    .set_delay(Duration::from_millis(1000)),
            )
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 100).unwrap();
        let err = client.fetch_address(1.0, 2.0).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(client.get_address(&Location::new(1.0, 2.0)).await, None);
    }

    #[tokio::test]
    async fn fixed_lookup_ignores_coordinates() {
        let lookup = FixedAddressLookup::default();
        let a = lookup.get_address(&Location::new(1.0, 2.0)).await;
        let b = lookup.get_address(&Location::new(-30.0, 120.0)).await;

        assert_eq!(a, b);
        assert_eq!(a.unwrap().state.as_deref(), Some("MA"));
    }

    #[tokio::test]
    async fn no_address_lookup_is_empty() {
        assert_eq!(NoAddressLookup.get_address(&Location::new(0.0, 0.0)).await, None);
    }
}
