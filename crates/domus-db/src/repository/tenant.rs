//! SurrealDB implementation of [`TenantRepository`].
//!
//! Tenants are append-only on the public surface, so only create and
//! read operations exist here.

use chrono::{DateTime, Utc};
use domus_core::error::{DomusError, DomusResult};
use domus_core::models::tenant::{CreateTenant, RentalHistoryEntry, Tenant};
use domus_core::repository::TenantRepository;
use domus_core::validate::{require_str, require_u32};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "tenant";

#[derive(Debug, Clone, SurrealValue)]
struct RentalHistoryRow {
    previous_address: String,
    landlord_contact: String,
    duration: String,
}

impl From<RentalHistoryEntry> for RentalHistoryRow {
    fn from(e: RentalHistoryEntry) -> Self {
        Self {
            previous_address: e.previous_address,
            landlord_contact: e.landlord_contact,
            duration: e.duration,
        }
    }
}

impl From<RentalHistoryRow> for RentalHistoryEntry {
    fn from(e: RentalHistoryRow) -> Self {
        Self {
            previous_address: e.previous_address,
            landlord_contact: e.landlord_contact,
            duration: e.duration,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    email: String,
    phone: String,
    emergency_contact: String,
    background_check_status: String,
    credit_score: u32,
    rental_history: Vec<RentalHistoryRow>,
    payment_preferences: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    name: String,
    email: String,
    phone: String,
    emergency_contact: String,
    background_check_status: String,
    credit_score: u32,
    rental_history: Vec<RentalHistoryRow>,
    payment_preferences: String,
    created_at: DateTime<Utc>,
}

impl TenantRow {
    fn into_tenant(self, id: Uuid) -> Tenant {
        Tenant {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            emergency_contact: self.emergency_contact,
            background_check_status: self.background_check_status,
            credit_score: self.credit_score,
            rental_history: self.rental_history.into_iter().map(Into::into).collect(),
            payment_preferences: self.payment_preferences,
            created_at: self.created_at,
        }
    }
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Tenant {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            emergency_contact: self.emergency_contact,
            background_check_status: self.background_check_status,
            credit_score: self.credit_score,
            rental_history: self.rental_history.into_iter().map(Into::into).collect(),
            payment_preferences: self.payment_preferences,
            created_at: self.created_at,
        })
    }
}

/// Presence checks for the creation payload. A credit score of zero is
/// rejected like a missing field.
fn validate_create(input: &CreateTenant) -> DomusResult<()> {
    require_str("name", &input.name)?;
    require_str("email", &input.email)?;
    require_str("phone", &input.phone)?;
    require_str("background_check_status", &input.background_check_status)?;
    require_u32("credit_score", input.credit_score)?;
    Ok(())
}

/// SurrealDB implementation of the Tenant repository.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, input: CreateTenant) -> DomusResult<Tenant> {
        validate_create(&input)?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let rental_history: Vec<RentalHistoryRow> =
            input.rental_history.into_iter().map(Into::into).collect();

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 name = $name, email = $email, phone = $phone, \
                 emergency_contact = $emergency_contact, \
                 background_check_status = $background_check_status, \
                 credit_score = $credit_score, \
                 rental_history = $rental_history, \
                 payment_preferences = $payment_preferences",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("emergency_contact", input.emergency_contact))
            .bind((
                "background_check_status",
                input.background_check_status,
            ))
            .bind(("credit_score", input.credit_score))
            .bind(("rental_history", rental_history))
            .bind(("payment_preferences", input.payment_preferences))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id))
    }

    async fn get_all(&self) -> DomusResult<Vec<Tenant>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM tenant")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_tenant().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_tenant(id))
    }
}
