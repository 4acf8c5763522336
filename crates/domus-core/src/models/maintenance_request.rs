//! Maintenance request domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default status for a freshly created request.
pub const STATUS_PENDING: &str = "pending";

/// A contractor work order attached to a request. Modeled and persisted,
/// but no handler appends to the list; it only changes via update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    pub order_date: String,
    pub contractor: String,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub property_id: Uuid,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: String,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    pub completion_date: String,
    pub tenant_feedback: String,
    pub images: Vec<String>,
    pub work_orders: Vec<WorkOrder>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub property_id: Uuid,
    pub description: String,
    pub priority: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateMaintenanceRequest {
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub completion_date: Option<String>,
    pub tenant_feedback: Option<String>,
    pub images: Option<Vec<String>>,
    pub work_orders: Option<Vec<WorkOrder>>,
}
