//! Financial transaction domain model.
//!
//! Append-only on the public surface: created and read, never updated
//! or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: Uuid,
    pub property_id: Uuid,
    /// Stamped at creation time.
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub transaction_type: String,
    pub description: String,
    pub category: String,
    pub payment_method: String,
    /// Caller identity recorded at creation; never consulted afterwards.
    pub recorded_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFinancialTransaction {
    pub property_id: Uuid,
    pub amount: f64,
    pub transaction_type: String,
    pub description: String,
    pub category: String,
    pub payment_method: String,
}
