//! In-memory price dataset

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::domain::Price;
use crate::error::PricingError;

/// Highest id in the generated dataset
pub const DATASET_SIZE: i64 = 19;

/// Read-only price table, ordered by id
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    prices: BTreeMap<i64, Price>,
}

impl PriceStore {
    pub fn from_prices(prices: impl IntoIterator<Item = Price>) -> Self {
        Self {
            prices: prices.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Ids `1..=DATASET_SIZE` in USD, amounts uniform in [5000, 25000) with
    /// two decimals. The same seed always gives the same table.
    pub fn generate(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::from_prices((1..=DATASET_SIZE).map(|id| {
            let cents: i64 = rng.gen_range(500_000..2_500_000);
            Price::new(id, "USD", Decimal::new(cents, 2))
        }))
    }

    pub fn all(&self) -> Vec<Price> {
        self.prices.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Result<Price, PricingError> {
        self.prices
            .get(&id)
            .cloned()
            .ok_or(PricingError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
