//! Car REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CarDto, CarRequest};
use crate::application::CarService;
use crate::domain::CarId;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CarsState {
    pub service: Arc<CarService>,
}

#[utoipa::path(
    get,
    path = "/cars",
    tag = "Cars",
    responses(
        (status = 200, description = "All cars, each with its current price", body = ApiResponse<Vec<CarDto>>)
    )
)]
pub async fn list_cars(
    State(state): State<CarsState>,
) -> Result<Json<ApiResponse<Vec<CarDto>>>, ApiError> {
    let cars = state.service.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        cars.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car with price and address", body = ApiResponse<CarDto>),
        (status = 404, description = "Car not found")
    )
)]
pub async fn get_car(
    State(state): State<CarsState>,
    Path(id): Path<CarId>,
) -> Result<Json<ApiResponse<CarDto>>, ApiError> {
    let car = state.service.find_by_id(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(car.into())))
}

#[utoipa::path(
    post,
    path = "/cars",
    tag = "Cars",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CarDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_car(
    State(state): State<CarsState>,
    ValidatedJson(req): ValidatedJson<CarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarDto>>), ApiError> {
    let car = state
        .service
        .save(req.into_car())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(car.into()))))
}

#[utoipa::path(
    put,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CarDto>),
        (status = 404, description = "Car not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_car(
    State(state): State<CarsState>,
    Path(id): Path<CarId>,
    ValidatedJson(req): ValidatedJson<CarRequest>,
) -> Result<Json<ApiResponse<CarDto>>, ApiError> {
    let car = state
        .service
        .save(req.into_car().with_id(id))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(car.into())))
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn delete_car(
    State(state): State<CarsState>,
    Path(id): Path<CarId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
