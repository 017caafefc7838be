//! Car DTOs
//!
//! Field names are camelCase on the wire (`fuelType`, `numberOfDoors`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Car, CarId, Condition, Details, Location, Manufacturer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionDto {
    Used,
    New,
}

impl From<Condition> for ConditionDto {
    fn from(c: Condition) -> Self {
        match c {
            Condition::Used => Self::Used,
            Condition::New => Self::New,
        }
    }
}

impl From<ConditionDto> for Condition {
    fn from(c: ConditionDto) -> Self {
        match c {
            ConditionDto::Used => Self::Used,
            ConditionDto::New => Self::New,
        }
    }
}

/// Vehicle maker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ManufacturerDto {
    pub code: i32,
    #[validate(length(min = 1, max = 100, message = "manufacturer name is required"))]
    pub name: String,
}

impl From<Manufacturer> for ManufacturerDto {
    fn from(m: Manufacturer) -> Self {
        Self {
            code: m.code,
            name: m.name,
        }
    }
}

impl From<ManufacturerDto> for Manufacturer {
    fn from(m: ManufacturerDto) -> Self {
        Manufacturer::new(m.code, m.name)
    }
}

/// Coordinates plus the address resolved for them.
///
/// Address fields sent by a client are ignored: they are looked up on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationDto {
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be within [-90, 90]"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "lon must be within [-180, 180]"))]
    pub lon: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            lat: l.lat,
            lon: l.lon,
            address: l.address,
            city: l.city,
            state: l.state,
            zip: l.zip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailsDto {
    #[validate(nested)]
    pub manufacturer: ManufacturerDto,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "mileage must be non-negative"))]
    pub mileage: Option<i32>,
    #[serde(default)]
    pub external_color: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1886, max = 3000, message = "modelYear must be within [1886, 3000]"))]
    pub model_year: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1886, max = 3000, message = "productionYear must be within [1886, 3000]"))]
    pub production_year: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, message = "numberOfDoors must be at least 1"))]
    pub number_of_doors: Option<i32>,
}

impl From<Details> for DetailsDto {
    fn from(d: Details) -> Self {
        Self {
            manufacturer: d.manufacturer.into(),
            model: d.model,
            body: d.body,
            engine: d.engine,
            fuel_type: d.fuel_type,
            mileage: d.mileage,
            external_color: d.external_color,
            model_year: d.model_year,
            production_year: d.production_year,
            number_of_doors: d.number_of_doors,
        }
    }
}

impl From<DetailsDto> for Details {
    fn from(d: DetailsDto) -> Self {
        Details {
            manufacturer: d.manufacturer.into(),
            model: d.model,
            body: d.body,
            engine: d.engine,
            fuel_type: d.fuel_type,
            mileage: d.mileage,
            external_color: d.external_color,
            model_year: d.model_year,
            production_year: d.production_year,
            number_of_doors: d.number_of_doors,
        }
    }
}

/// Body of `POST /cars` and `PUT /cars/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CarRequest {
    pub condition: ConditionDto,
    #[validate(nested)]
    pub location: LocationDto,
    #[validate(nested)]
    pub details: DetailsDto,
}

impl CarRequest {
    pub fn into_car(self) -> Car {
        Car::new(
            self.condition.into(),
            Location::new(self.location.lat, self.location.lon),
            self.details.into(),
        )
    }
}

/// A car as returned by the API, enriched with price and address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    /// Absent only for a car that was never stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CarId>,
    pub condition: ConditionDto,
    pub location: LocationDto,
    pub details: DetailsDto,
    pub price: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Car> for CarDto {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            condition: c.condition.into(),
            location: c.location.into(),
            details: c.details.into(),
            price: c.price,
            created_at: c.created_at,
            modified_at: c.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_json() -> serde_json::Value {
        json!({
            "condition": "USED",
            "location": {"lat": 40.730610, "lon": -73.935242, "city": "ignored"},
            "details": {
                "manufacturer": {"code": 101, "name": "Chevrolet"},
                "model": "Impala",
                "fuelType": "Gasoline",
                "numberOfDoors": 4,
                "modelYear": 2018
            }
        })
    }

    #[test]
    fn request_builds_car_without_address() {
        let req: CarRequest = serde_json::from_value(request_json()).unwrap();
        assert!(req.validate().is_ok());

        let car = req.into_car();
        assert_eq!(car.id, None);
        assert_eq!(car.condition, Condition::Used);
        assert_eq!(car.location, Location::new(40.730610, -73.935242));
        assert_eq!(car.details.manufacturer, Manufacturer::new(101, "Chevrolet"));
        assert_eq!(car.details.fuel_type.as_deref(), Some("Gasoline"));
        assert_eq!(car.details.number_of_doors, Some(4));
    }

    #[test]
    fn out_of_range_fields_fail_validation() {
        let mut body = request_json();
        body["location"]["lon"] = json!(200.0);
        body["details"]["numberOfDoors"] = json!(0);
        body["details"]["manufacturer"]["name"] = json!("");

        let req: CarRequest = serde_json::from_value(body).unwrap();
        let errors = req.validate().unwrap_err();

        assert!(errors.errors().contains_key("location"));
        assert!(errors.errors().contains_key("details"));
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let mut body = request_json();
        body["condition"] = json!("BROKEN");
        assert!(serde_json::from_value::<CarRequest>(body).is_err());
    }

    #[test]
    fn response_uses_camel_case() {
        let mut details = Details::new(Manufacturer::new(100, "Audi"));
        details.external_color = Some("red".into());
        let car = Car::new(Condition::New, Location::new(1.0, 2.0), details).with_id(9);

        let value = serde_json::to_value(CarDto::from(car)).unwrap();

        assert_eq!(value["id"], 9);
        assert_eq!(value["condition"], "NEW");
        assert_eq!(value["details"]["externalColor"], "red");
        assert!(value["price"].is_null());
    }

    #[test]
    fn unsaved_car_has_no_id() {
        let car = Car::new(
            Condition::New,
            Location::new(1.0, 2.0),
            Details::new(Manufacturer::new(100, "Audi")),
        );

        let dto = CarDto::from(car);
        assert_eq!(dto.id, None);

        let value = serde_json::to_value(dto).unwrap();
        assert!(value.get("id").is_none());
    }
}
