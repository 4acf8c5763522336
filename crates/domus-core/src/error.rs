//! Error types for the Domus system.
//!
//! Every failure is returned as a value; handlers map these variants onto
//! the response envelope's error kinds. `Empty` is distinct from `NotFound`
//! internally (enumeration vs. id lookup) but both surface as the same
//! not-found kind to callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomusError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("no {entity} records found")]
    Empty { entity: String },

    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("invalid date range: start date {start} must be before end date {end}")]
    InvalidDate { start: String, end: String },

    #[error("payment failed: amount must equal the lease rent of {expected}")]
    PaymentFailed { expected: f64 },

    #[error("lease agreement {id} is completed and accepts no further payments")]
    PaymentCompleted { id: String },

    #[error("database error: {0}")]
    Database(String),
}

impl DomusError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn empty(entity: &str) -> Self {
        Self::Empty {
            entity: entity.into(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::InvalidPayload {
            message: format!("missing required field: {field}"),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }
}

pub type DomusResult<T> = Result<T, DomusError>;
