//! Pricing REST API

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::PricingError;
use crate::hal::{Hal, PriceCollection, PriceResource};
use crate::store::PriceStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PriceStore>,
}

/// `GET /prices` - every price
pub async fn list_prices(State(state): State<AppState>) -> Hal<PriceCollection> {
    Hal(PriceCollection::new(state.store.all()))
}

/// `GET /prices/{id}` - one price, 404 when unknown
pub async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Hal<PriceResource>, PricingError> {
    let price = state.store.get(id)?;
    debug!(id, price = %price.price, "Price served");
    Ok(Hal(price.into()))
}

pub fn create_router(store: Arc<PriceStore>) -> Router {
    Router::new()
        .route("/prices", get(list_prices))
        .route("/prices/", get(list_prices))
        .route("/prices/{id}", get(get_price))
        .with_state(AppState { store })
        .layer(TraceLayer::new_for_http())
}
