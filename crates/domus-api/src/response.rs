//! Uniform response envelope returned by every request handler.

use domus_core::error::{DomusError, DomusResult};
use serde::{Deserialize, Serialize};

/// Machine-readable error classification carried in error envelopes.
///
/// Both `NotFound` and `Empty` core errors surface as `NotFound` here;
/// callers see a single not-found kind whether an id lookup missed or an
/// enumeration came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidPayload,
    InvalidDate,
    PaymentFailed,
    PaymentCompleted,
    Internal,
}

impl From<&DomusError> for ErrorKind {
    fn from(err: &DomusError) -> Self {
        match err {
            DomusError::NotFound { .. } | DomusError::Empty { .. } => Self::NotFound,
            DomusError::InvalidPayload { .. } => Self::InvalidPayload,
            DomusError::InvalidDate { .. } => Self::InvalidDate,
            DomusError::PaymentFailed { .. } => Self::PaymentFailed,
            DomusError::PaymentCompleted { .. } => Self::PaymentCompleted,
            DomusError::Database(_) => Self::Internal,
        }
    }
}

/// Tagged success-or-error envelope.
///
/// Serializes as `{"status": "success", "data": ...}` or
/// `{"status": "error", "kind": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { kind: ErrorKind, message: String },
}

impl<T> ApiResponse<T> {
    pub fn from_result(result: DomusResult<T>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(err) => Self::Error {
                kind: ErrorKind::from(&err),
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error kind, if this is an error envelope.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }

    /// The success value, if this is a success envelope.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Error { .. } => None,
        }
    }
}

impl<T> From<DomusResult<T>> for ApiResponse<T> {
    fn from(result: DomusResult<T>) -> Self {
        Self::from_result(result)
    }
}
