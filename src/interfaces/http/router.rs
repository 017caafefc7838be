//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::CarService;
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::cars::{self, CarDto, CarRequest, ConditionDto, DetailsDto, LocationDto, ManufacturerDto};
use super::modules::health::{self, CatalogueHealth, HealthResponse, LookupSettings};
use super::modules::manufacturers;
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cars::list_cars,
        cars::get_car,
        cars::create_car,
        cars::update_car,
        cars::delete_car,
        manufacturers::list_manufacturers,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<CarDto>,
            ApiResponse<Vec<CarDto>>,
            CarDto,
            CarRequest,
            ConditionDto,
            LocationDto,
            DetailsDto,
            ManufacturerDto,
            HealthResponse,
            CatalogueHealth,
            LookupSettings,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Cars", description = "Vehicle catalog: CRUD with live price and address"),
        (name = "Manufacturers", description = "Known vehicle makers"),
    ),
    info(
        title = "Vehicles API",
        description = "Vehicle catalog enriched with prices from the pricing service and addresses from the maps service",
    )
)]
pub struct ApiDoc;

/// Build the vehicles REST API.
///
/// `/metrics` is mounted only when a Prometheus handle is given; the recorder
/// is process-global and tests run without one.
pub fn create_api_router(
    car_service: Arc<CarService>,
    repos: Arc<dyn RepositoryProvider>,
    lookups: LookupSettings,
    prometheus_handle: Option<PrometheusHandle>,
) -> Router {
    let car_routes = Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/{id}",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        )
        .with_state(cars::CarsState {
            service: car_service,
        });

    let manufacturer_routes = Router::new()
        .route("/manufacturers", get(manufacturers::list_manufacturers))
        .with_state(manufacturers::ManufacturersState {
            repos: repos.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            repos,
            lookups,
            started_at: Arc::new(Instant::now()),
        });

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(car_routes)
        .merge(manufacturer_routes);

    if let Some(handle) = prometheus_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::{LocationLookup, PriceLookup};
    use crate::domain::{Address, CarId, Location};
    use crate::infrastructure::storage::InMemoryStorage;

    struct FixedPrice;

    #[async_trait]
    impl PriceLookup for FixedPrice {
        async fn get_price(&self, _vehicle_id: CarId) -> Option<String> {
            Some("USD 1234.56".to_string())
        }
    }

    struct FallRiver;

    #[async_trait]
    impl LocationLookup for FallRiver {
        async fn get_address(&self, _location: &Location) -> Option<Address> {
            Some(Address {
                address: Some("374 William S Canning Blvd".into()),
                city: Some("Fall River".into()),
                state: Some("MA".into()),
                zip: Some("2721".into()),
            })
        }
    }

    fn app() -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStorage::new());
        let service = Arc::new(CarService::new(
            repos.clone(),
            Arc::new(FixedPrice),
            Arc::new(FallRiver),
        ));
        let lookups = LookupSettings::from(&crate::config::ClientsConfig::default());
        create_api_router(service, repos, lookups, None)
    }

    fn impala() -> Value {
        json!({
            "condition": "USED",
            "location": {"lat": 40.730610, "lon": -73.935242},
            "details": {
                "manufacturer": {"code": 101, "name": "Chevrolet"},
                "model": "Impala",
                "body": "sedan",
                "engine": "3.6L V6",
                "fuelType": "Gasoline",
                "mileage": 32280,
                "externalColor": "white",
                "modelYear": 2018,
                "productionYear": 2018,
                "numberOfDoors": 4
            }
        })
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };

        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn create_returns_201_with_id() {
        let app = app();
        let (status, body) = call(&app, "POST", "/cars", Some(impala())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["details"]["model"], "Impala");
    }

    #[tokio::test]
    async fn get_enriches_price_and_address() {
        let app = app();
        call(&app, "POST", "/cars", Some(impala())).await;

        let (status, body) = call(&app, "GET", "/cars/1", None).await;

        assert_eq!(status, StatusCode::OK);
        let car = &body["data"];
        assert_eq!(car["price"], "USD 1234.56");
        assert_eq!(car["location"]["lat"], 40.730610);
        assert_eq!(car["location"]["lon"], -73.935242);
        assert_eq!(car["location"]["address"], "374 William S Canning Blvd");
        assert_eq!(car["location"]["city"], "Fall River");
        assert_eq!(car["location"]["zip"], "2721");
        assert_eq!(car["location"]["state"], "MA");
    }

    #[tokio::test]
    async fn list_prices_each_car_without_address() {
        let app = app();
        call(&app, "POST", "/cars", Some(impala())).await;
        call(&app, "POST", "/cars", Some(impala())).await;

        let (status, body) = call(&app, "GET", "/cars", None).await;

        assert_eq!(status, StatusCode::OK);
        let cars = body["data"].as_array().unwrap();
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0]["price"], "USD 1234.56");
        assert!(cars[0]["location"]["city"].is_null());
    }

    #[tokio::test]
    async fn update_overwrites_car() {
        let app = app();
        call(&app, "POST", "/cars", Some(impala())).await;

        let mut changed = impala();
        changed["condition"] = json!("NEW");
        changed["location"] = json!({"lat": 42.4242, "lon": -47.11});
        let (status, body) = call(&app, "PUT", "/cars/1", Some(changed)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["condition"], "NEW");
        assert_eq!(body["data"]["location"]["lat"], 42.4242);
    }

    #[tokio::test]
    async fn update_of_missing_car_is_404() {
        let app = app();
        let (status, body) = call(&app, "PUT", "/cars/9", Some(impala())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert!(call(&app, "GET", "/cars", None).await.1["data"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let app = app();
        call(&app, "POST", "/cars", Some(impala())).await;

        let (status, _) = call(&app, "DELETE", "/cars/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, "GET", "/cars/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "DELETE", "/cars/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_coordinates_are_422() {
        let app = app();
        let mut bad = impala();
        bad["location"]["lat"] = json!(123.0);

        let (status, body) = call(&app, "POST", "/cars", Some(bad)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("location.lat"));
    }

    #[tokio::test]
    async fn new_manufacturer_is_listed() {
        let app = app();
        let mut car = impala();
        car["details"]["manufacturer"] = json!({"code": 210, "name": "Volvo"});
        call(&app, "POST", "/cars", Some(car)).await;

        let (status, body) = call(&app, "GET", "/manufacturers", None).await;

        assert_eq!(status, StatusCode::OK);
        let makers = body["data"].as_array().unwrap();
        assert_eq!(makers.len(), 6);
        assert_eq!(makers[0], json!({"code": 100, "name": "Audi"}));
        assert_eq!(makers[5], json!({"code": 210, "name": "Volvo"}));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["catalogue"]["status"], "ok");
        assert_eq!(body["catalogue"]["cars"], 0);
        assert_eq!(body["catalogue"]["manufacturers"], 5);
        assert_eq!(body["lookups"]["maps_mode"], "static");
        assert_eq!(body["lookups"]["pricing_url"], "http://localhost:8082");
    }

    #[tokio::test]
    async fn metrics_route_absent_without_recorder() {
        let (status, _) = call(&app(), "GET", "/metrics", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
