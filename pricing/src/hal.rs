//! HAL (`application/hal+json`) representations of prices

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::Price;

pub const HAL_JSON: &str = "application/hal+json";

/// JSON body sent with the HAL content type
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, axum::http::HeaderValue::from_static(HAL_JSON));
        response
    }
}

#[derive(Debug, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn to(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub price: Link,
}

#[derive(Debug, Serialize)]
pub struct PriceResource {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "_links")]
    pub links: PriceLinks,
}

impl From<Price> for PriceResource {
    fn from(p: Price) -> Self {
        let href = format!("/prices/{}", p.id);
        Self {
            currency: p.currency,
            price: p.price,
            links: PriceLinks {
                self_link: Link::to(href.clone()),
                price: Link::to(href),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbeddedPrices {
    pub prices: Vec<PriceResource>,
}

#[derive(Debug, Serialize)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Serialize)]
pub struct PriceCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedPrices,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

impl PriceCollection {
    pub fn new(prices: Vec<Price>) -> Self {
        Self {
            embedded: EmbeddedPrices {
                prices: prices.into_iter().map(Into::into).collect(),
            },
            links: CollectionLinks {
                self_link: Link::to("/prices"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_links_to_itself() {
        let value = serde_json::to_value(PriceResource::from(Price::new(
            3,
            "USD",
            Decimal::new(1234550, 2),
        )))
        .unwrap();

        assert_eq!(value["currency"], "USD");
        assert_eq!(value["price"], 12345.5);
        assert_eq!(value["_links"]["self"]["href"], "/prices/3");
    }
}
