//! Tenant domain model.
//!
//! Tenants are append-only on the public surface: once created they can
//! be read but not updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One prior rental of a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RentalHistoryEntry {
    pub previous_address: String,
    pub landlord_contact: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub emergency_contact: String,
    pub background_check_status: String,
    pub credit_score: u32,
    pub rental_history: Vec<RentalHistoryEntry>,
    pub payment_preferences: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub emergency_contact: String,
    pub background_check_status: String,
    pub credit_score: u32,
    #[serde(default)]
    pub rental_history: Vec<RentalHistoryEntry>,
    #[serde(default)]
    pub payment_preferences: String,
}
