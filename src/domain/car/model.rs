//! Car domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::manufacturer::Manufacturer;
use crate::shared::errors::DomainError;

/// Repository-assigned car identifier
pub type CarId = i64;

/// Whether the vehicle is sold new or used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Used,
    New,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Used => write!(f, "USED"),
            Self::New => write!(f, "NEW"),
        }
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USED" => Ok(Self::Used),
            "NEW" => Ok(Self::New),
            other => Err(DomainError::Validation(format!(
                "unknown car condition '{}'",
                other
            ))),
        }
    }
}

/// Postal address returned by a reverse-geocoding lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Where the car is parked.
///
/// Only `lat` / `lon` are authoritative and persisted. The address fields
/// are filled in at read time from the location lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ..Default::default()
        }
    }

    /// Same coordinates, address fields taken from `address`.
    pub fn with_address(&self, address: Address) -> Self {
        Self {
            lat: self.lat,
            lon: self.lon,
            address: address.address,
            city: address.city,
            state: address.state,
            zip: address.zip,
        }
    }

    /// Coordinates only, as stored by the repositories.
    pub fn without_address(&self) -> Self {
        Self::new(self.lat, self.lon)
    }

    pub fn has_address(&self) -> bool {
        self.address.is_some() || self.city.is_some() || self.state.is_some() || self.zip.is_some()
    }
}

/// Descriptive attributes of a car
#[derive(Debug, Clone, PartialEq)]
pub struct Details {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub body: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub mileage: Option<i32>,
    pub external_color: Option<String>,
    pub model_year: Option<i32>,
    pub production_year: Option<i32>,
    pub number_of_doors: Option<i32>,
}

impl Details {
    pub fn new(manufacturer: Manufacturer) -> Self {
        Self {
            manufacturer,
            model: None,
            body: None,
            engine: None,
            fuel_type: None,
            mileage: None,
            external_color: None,
            model_year: None,
            production_year: None,
            number_of_doors: None,
        }
    }
}

/// Car listing
///
/// `price` is never stored: it is fetched from the pricing service each time
/// the car is read.
#[derive(Debug, Clone)]
pub struct Car {
    /// `None` until the repository stores the car for the first time
    pub id: Option<CarId>,
    pub condition: Condition,
    pub location: Location,
    pub details: Details,
    pub price: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Car {
    pub fn new(condition: Condition, location: Location, details: Details) -> Self {
        Self {
            id: None,
            condition,
            location,
            details,
            price: None,
            created_at: None,
            modified_at: None,
        }
    }

    pub fn with_id(mut self, id: CarId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrite the mutable fields with those of `other`.
    /// The id and creation time are kept.
    pub fn apply_update(&mut self, other: Car) {
        self.condition = other.condition;
        self.location = other.location;
        self.details = other.details;
        self.modified_at = Some(Utc::now());
    }

    /// The car as a repository keeps it: no price, no address.
    pub fn to_record(&self) -> Car {
        Car {
            location: self.location.without_address(),
            price: None,
            ..self.clone()
        }
    }
}

/// Timestamps are bookkeeping and do not take part in equality.
impl PartialEq for Car {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.condition == other.condition
            && self.location == other.location
            && self.details == other.details
            && self.price == other.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Car {
        let mut details = Details::new(Manufacturer::new(101, "Chevrolet"));
        details.model = Some("Impala".into());
        Car::new(Condition::Used, Location::new(40.730610, -73.935242), details)
    }

    #[test]
    fn condition_parses_case_insensitively() {
        assert_eq!("used".parse::<Condition>().unwrap(), Condition::Used);
        assert_eq!("NEW".parse::<Condition>().unwrap(), Condition::New);
        assert!("broken".parse::<Condition>().is_err());
        assert_eq!(Condition::New.to_string(), "NEW");
    }

    #[test]
    fn with_address_keeps_coordinates() {
        let location = Location::new(40.730610, -73.935242);
        let enriched = location.with_address(Address {
            address: Some("374 William S Canning Blvd".into()),
            city: Some("Fall River".into()),
            state: Some("MA".into()),
            zip: Some("2721".into()),
        });

        assert_eq!(enriched.lat, 40.730610);
        assert_eq!(enriched.lon, -73.935242);
        assert_eq!(enriched.city.as_deref(), Some("Fall River"));
        assert!(enriched.has_address());
        assert_eq!(enriched.without_address(), location);
    }

    #[test]
    fn apply_update_keeps_identity() {
        let mut car = sample_car().with_id(7);
        car.created_at = Some(Utc::now());
        let created = car.created_at;

        let mut replacement = sample_car().with_id(99);
        replacement.condition = Condition::New;
        replacement.location = Location::new(42.4242, -47.11);

        car.apply_update(replacement.clone());

        assert_eq!(car.id, Some(7));
        assert_eq!(car.created_at, created);
        assert!(car.modified_at.is_some());
        assert_eq!(car.condition, Condition::New);
        assert_eq!(car.location, replacement.location);
    }

    #[test]
    fn record_drops_read_time_enrichment() {
        let mut car = sample_car();
        car.price = Some("USD 1.00".into());
        car.location.city = Some("Nowhere".into());

        let record = car.to_record();
        assert_eq!(record.price, None);
        assert!(!record.location.has_address());
        assert_eq!(record.details, car.details);
    }

    #[test]
    fn equality_ignores_timestamps() {
        let a = sample_car();
        let mut b = a.clone();
        b.created_at = Some(Utc::now());
        assert_eq!(a, b);
    }
}
