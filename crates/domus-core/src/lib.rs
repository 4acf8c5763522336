//! Domus Core — domain models, error taxonomy, repository traits, and
//! payload validation shared across all crates.

pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{DomusError, DomusResult};
