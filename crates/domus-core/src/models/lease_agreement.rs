//! Lease agreement domain model.
//!
//! `start_date` and `end_date` are ISO-8601 date strings ordered
//! lexicographically, which for that format is chronological order.
//! `renewal_status` is free-form except for the sentinel `"completed"`,
//! which blocks further rent payments. Nothing in this system sets the
//! sentinel itself; it only ever arrives through the generic update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel `renewal_status` value that stops payment recording.
pub const RENEWAL_COMPLETED: &str = "completed";

/// One recorded rent payment. Appended only; never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RentPayment {
    pub payment_date: DateTime<Utc>,
    pub amount: f64,
    pub status: String,
}

/// A recorded lease violation. Modeled and persisted, but no handler
/// appends to the list; it only changes via wholesale update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaseViolation {
    pub date: String,
    pub description: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseAgreement {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub rent: f64,
    pub start_date: String,
    pub end_date: String,
    pub digital_signature: String,
    pub security_deposit: f64,
    pub utility_responsibilities: Vec<String>,
    pub rent_payment_history: Vec<RentPayment>,
    pub lease_violations: Vec<LeaseViolation>,
    pub renewal_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaseAgreement {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub rent: f64,
    pub start_date: String,
    pub end_date: String,
    pub digital_signature: String,
    pub security_deposit: f64,
    #[serde(default)]
    pub utility_responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateLeaseAgreement {
    pub rent: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub digital_signature: Option<String>,
    pub security_deposit: Option<f64>,
    pub utility_responsibilities: Option<Vec<String>>,
    /// History arrays are preserved unless explicitly included here, in
    /// which case the stored list is replaced wholesale.
    pub rent_payment_history: Option<Vec<RentPayment>>,
    pub lease_violations: Option<Vec<LeaseViolation>>,
    pub renewal_status: Option<String>,
}
