//! Domus API — request handlers and the uniform response envelope.
//!
//! One handler per exposed operation (28 total). Each accepts a typed
//! payload, delegates to the matching repository, and maps the outcome
//! into [`ApiResponse`]. Transport and caller-identity resolution are
//! host concerns; mutating handlers that record identity take the opaque
//! caller string as an argument.

pub mod handlers;
pub mod response;

pub use handlers::Handlers;
pub use response::{ApiResponse, ErrorKind};
