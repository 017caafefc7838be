//! Manufacturer catalogue handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};
use crate::interfaces::http::modules::cars::ManufacturerDto;

#[derive(Clone)]
pub struct ManufacturersState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "Manufacturers",
    responses(
        (status = 200, description = "Known manufacturers ordered by code", body = ApiResponse<Vec<ManufacturerDto>>)
    )
)]
pub async fn list_manufacturers(
    State(state): State<ManufacturersState>,
) -> Result<Json<ApiResponse<Vec<ManufacturerDto>>>, ApiError> {
    let makers = state
        .repos
        .manufacturers()
        .find_all()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        makers.into_iter().map(Into::into).collect(),
    )))
}
