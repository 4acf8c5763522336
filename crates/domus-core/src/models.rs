//! Domain models for Domus.
//!
//! One module per entity family. Each module carries the stored record
//! type, its creation payload, and, where the entity exposes an update
//! operation, an all-optional update payload for shallow merges.

pub mod document;
pub mod financial_transaction;
pub mod lease_agreement;
pub mod maintenance_request;
pub mod property;
pub mod tenant;
