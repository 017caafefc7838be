//! Manufacturer domain entity

/// Vehicle maker, identified by a numeric code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Manufacturer {
    pub code: i32,
    pub name: String,
}

impl Manufacturer {
    pub fn new(code: i32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Catalogue every store starts with
    pub fn defaults() -> Vec<Manufacturer> {
        vec![
            Manufacturer::new(100, "Audi"),
            Manufacturer::new(101, "Chevrolet"),
            Manufacturer::new(102, "Ford"),
            Manufacturer::new(103, "BMW"),
            Manufacturer::new(104, "Dodge"),
        ]
    }
}
