//! Health check handler
//!
//! Storage decides the overall status. The lookups are reported as
//! configured but never probed: a missing price or address does not make
//! the catalogue unhealthy.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{ClientsConfig, MapsMode};
use crate::domain::{DomainResult, RepositoryProvider};

#[derive(Clone)]
pub struct HealthState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub lookups: LookupSettings,
    pub started_at: Arc<Instant>,
}

/// Where enrichment data comes from
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LookupSettings {
    pub pricing_url: String,
    /// `http`, `static` or `disabled`
    pub maps_mode: String,
    /// Only set in `http` mode
    pub maps_url: Option<String>,
}

impl From<&ClientsConfig> for LookupSettings {
    fn from(c: &ClientsConfig) -> Self {
        let (maps_mode, maps_url) = match c.maps_mode {
            MapsMode::Http => ("http", Some(c.maps_url.clone())),
            MapsMode::Static => ("static", None),
            MapsMode::Disabled => ("disabled", None),
        };
        Self {
            pricing_url: c.pricing_url.clone(),
            maps_mode: maps_mode.to_string(),
            maps_url,
        }
    }
}

/// Row counts, present when storage answered
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogueHealth {
    pub status: String,
    pub cars: Option<usize>,
    pub manufacturers: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub catalogue: CatalogueHealth,
    pub lookups: LookupSettings,
}

async fn count_rows(repos: &dyn RepositoryProvider) -> DomainResult<(usize, usize)> {
    let cars = repos.cars().find_all().await?.len();
    let manufacturers = repos.manufacturers().find_all().await?.len();
    Ok((cars, manufacturers))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Catalogue storage is reachable", body = HealthResponse),
        (status = 503, description = "Catalogue storage is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (http_status, catalogue) = match count_rows(state.repos.as_ref()).await {
        Ok((cars, manufacturers)) => (
            StatusCode::OK,
            CatalogueHealth {
                status: "ok".to_string(),
                cars: Some(cars),
                manufacturers: Some(manufacturers),
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read the catalogue");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                CatalogueHealth {
                    status: "error".to_string(),
                    cars: None,
                    manufacturers: None,
                },
            )
        }
    };

    let status = if http_status.is_success() { "ok" } else { "degraded" };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            catalogue,
            lookups: state.lookups.clone(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_url_only_reported_for_http_mode() {
        let mut clients = ClientsConfig::default();
        let settings = LookupSettings::from(&clients);
        assert_eq!(settings.maps_mode, "static");
        assert_eq!(settings.maps_url, None);
        assert_eq!(settings.pricing_url, "http://localhost:8082");

        clients.maps_mode = MapsMode::Http;
        let settings = LookupSettings::from(&clients);
        assert_eq!(settings.maps_mode, "http");
        assert_eq!(settings.maps_url.as_deref(), Some("http://localhost:9191"));
    }
}
