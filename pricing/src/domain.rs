//! Price entity

use rust_decimal::Decimal;

/// Price of one vehicle. `id` matches the vehicle id by convention only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub id: i64,
    pub currency: String,
    pub price: Decimal,
}

impl Price {
    pub fn new(id: i64, currency: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            currency: currency.into(),
            price,
        }
    }
}
