//! Shared HTTP building blocks: response envelope, error mapping, extractors

mod error;
mod response;
mod validated_json;

pub use error::{domain_error, status_for, ApiError};
pub use response::ApiResponse;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
