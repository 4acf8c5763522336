//! SurrealDB implementation of [`MaintenanceRequestRepository`].
//!
//! New requests start in `pending` status with empty assignment, cost,
//! feedback, and completion fields. There is no delete operation and no
//! dedicated work-order append; work orders only change through the
//! generic update.

use chrono::{DateTime, Utc};
use domus_core::error::{DomusError, DomusResult};
use domus_core::models::maintenance_request::{
    CreateMaintenanceRequest, MaintenanceRequest, STATUS_PENDING, UpdateMaintenanceRequest,
    WorkOrder,
};
use domus_core::repository::MaintenanceRequestRepository;
use domus_core::validate::require_str;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::record_exists;

const ENTITY: &str = "maintenance request";

#[derive(Debug, Clone, SurrealValue)]
struct WorkOrderRow {
    order_date: String,
    contractor: String,
    status: String,
    notes: String,
}

impl From<WorkOrder> for WorkOrderRow {
    fn from(w: WorkOrder) -> Self {
        Self {
            order_date: w.order_date,
            contractor: w.contractor,
            status: w.status,
            notes: w.notes,
        }
    }
}

impl From<WorkOrderRow> for WorkOrder {
    fn from(w: WorkOrderRow) -> Self {
        Self {
            order_date: w.order_date,
            contractor: w.contractor,
            status: w.status,
            notes: w.notes,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct RequestRow {
    property_id: String,
    description: String,
    status: String,
    priority: String,
    assigned_to: String,
    estimated_cost: f64,
    actual_cost: f64,
    completion_date: String,
    tenant_feedback: String,
    images: Vec<String>,
    work_orders: Vec<WorkOrderRow>,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct RequestRowWithId {
    record_id: String,
    property_id: String,
    description: String,
    status: String,
    priority: String,
    assigned_to: String,
    estimated_cost: f64,
    actual_cost: f64,
    completion_date: String,
    tenant_feedback: String,
    images: Vec<String>,
    work_orders: Vec<WorkOrderRow>,
    created_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_request(self, id: Uuid) -> Result<MaintenanceRequest, DbError> {
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(MaintenanceRequest {
            id,
            property_id,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            completion_date: self.completion_date,
            tenant_feedback: self.tenant_feedback,
            images: self.images,
            work_orders: self.work_orders.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
        })
    }
}

impl RequestRowWithId {
    fn try_into_request(self) -> Result<MaintenanceRequest, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(MaintenanceRequest {
            id,
            property_id,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            completion_date: self.completion_date,
            tenant_feedback: self.tenant_feedback,
            images: self.images,
            work_orders: self.work_orders.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
        })
    }
}

fn validate_create(input: &CreateMaintenanceRequest) -> DomusResult<()> {
    require_str("description", &input.description)?;
    require_str("priority", &input.priority)?;
    Ok(())
}

/// SurrealDB implementation of the MaintenanceRequest repository.
#[derive(Clone)]
pub struct SurrealMaintenanceRequestRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMaintenanceRequestRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MaintenanceRequestRepository for SurrealMaintenanceRequestRepository<C> {
    async fn create(&self, input: CreateMaintenanceRequest) -> DomusResult<MaintenanceRequest> {
        validate_create(&input)?;

        let property_id = input.property_id.to_string();
        if !record_exists(&self.db, "property", &property_id).await? {
            return Err(DomusError::not_found("property", &property_id));
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('maintenance_request', $id) SET \
                 property_id = $property_id, description = $description, \
                 status = $status, priority = $priority, \
                 assigned_to = '', estimated_cost = 0.0, \
                 actual_cost = 0.0, completion_date = '', \
                 tenant_feedback = '', images = $images, \
                 work_orders = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("property_id", property_id))
            .bind(("description", input.description))
            .bind(("status", STATUS_PENDING.to_string()))
            .bind(("priority", input.priority))
            .bind(("images", input.images))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }

    async fn get_all(&self) -> DomusResult<Vec<MaintenanceRequest>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM maintenance_request")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RequestRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_request().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<MaintenanceRequest> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('maintenance_request', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_request(id)?)
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateMaintenanceRequest,
    ) -> DomusResult<MaintenanceRequest> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.priority.is_some() {
            sets.push("priority = $priority");
        }
        if input.assigned_to.is_some() {
            sets.push("assigned_to = $assigned_to");
        }
        if input.estimated_cost.is_some() {
            sets.push("estimated_cost = $estimated_cost");
        }
        if input.actual_cost.is_some() {
            sets.push("actual_cost = $actual_cost");
        }
        if input.completion_date.is_some() {
            sets.push("completion_date = $completion_date");
        }
        if input.tenant_feedback.is_some() {
            sets.push("tenant_feedback = $tenant_feedback");
        }
        if input.images.is_some() {
            sets.push("images = $images");
        }
        if input.work_orders.is_some() {
            sets.push("work_orders = $work_orders");
        }

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('maintenance_request', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status));
        }
        if let Some(priority) = input.priority {
            builder = builder.bind(("priority", priority));
        }
        if let Some(assigned_to) = input.assigned_to {
            builder = builder.bind(("assigned_to", assigned_to));
        }
        if let Some(estimated_cost) = input.estimated_cost {
            builder = builder.bind(("estimated_cost", estimated_cost));
        }
        if let Some(actual_cost) = input.actual_cost {
            builder = builder.bind(("actual_cost", actual_cost));
        }
        if let Some(completion_date) = input.completion_date {
            builder = builder.bind(("completion_date", completion_date));
        }
        if let Some(tenant_feedback) = input.tenant_feedback {
            builder = builder.bind(("tenant_feedback", tenant_feedback));
        }
        if let Some(images) = input.images {
            builder = builder.bind(("images", images));
        }
        if let Some(work_orders) = input.work_orders {
            let rows: Vec<WorkOrderRow> = work_orders.into_iter().map(Into::into).collect();
            builder = builder.bind(("work_orders", rows));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_request(id)?)
    }
}
