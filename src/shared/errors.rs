use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn car_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Car",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        Self::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_not_found_message_names_the_id() {
        let err = DomainError::car_not_found(42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Car with id=42");
    }

    #[test]
    fn infra_errors_become_storage_errors() {
        let err: DomainError = InfraError::Config("bad url".into()).into();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: Configuration error: bad url");
    }
}
