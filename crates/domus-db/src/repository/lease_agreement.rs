//! SurrealDB implementation of [`LeaseAgreementRepository`].
//!
//! Creation verifies the referenced tenant and property exist (in that
//! order) before validating the date range. Payment recording is the one
//! piece of state-machine behavior in the system: the sentinel
//! `renewal_status == "completed"` blocks payments, and an exact rent
//! match appends a single history entry. Nothing here ever sets the
//! sentinel; it only arrives through the generic update.

use chrono::{DateTime, Utc};
use domus_core::error::{DomusError, DomusResult};
use domus_core::models::lease_agreement::{
    CreateLeaseAgreement, LeaseAgreement, LeaseViolation, RENEWAL_COMPLETED, RentPayment,
    UpdateLeaseAgreement,
};
use domus_core::repository::LeaseAgreementRepository;
use domus_core::validate::{require_f64, require_str};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::record_exists;

const ENTITY: &str = "lease agreement";

#[derive(Debug, Clone, SurrealValue)]
struct RentPaymentRow {
    payment_date: DateTime<Utc>,
    amount: f64,
    status: String,
}

impl From<RentPayment> for RentPaymentRow {
    fn from(p: RentPayment) -> Self {
        Self {
            payment_date: p.payment_date,
            amount: p.amount,
            status: p.status,
        }
    }
}

impl From<RentPaymentRow> for RentPayment {
    fn from(p: RentPaymentRow) -> Self {
        Self {
            payment_date: p.payment_date,
            amount: p.amount,
            status: p.status,
        }
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct LeaseViolationRow {
    date: String,
    description: String,
    resolved: bool,
}

impl From<LeaseViolation> for LeaseViolationRow {
    fn from(v: LeaseViolation) -> Self {
        Self {
            date: v.date,
            description: v.description,
            resolved: v.resolved,
        }
    }
}

impl From<LeaseViolationRow> for LeaseViolation {
    fn from(v: LeaseViolationRow) -> Self {
        Self {
            date: v.date,
            description: v.description,
            resolved: v.resolved,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct LeaseRow {
    property_id: String,
    tenant_id: String,
    rent: f64,
    start_date: String,
    end_date: String,
    digital_signature: String,
    security_deposit: f64,
    utility_responsibilities: Vec<String>,
    rent_payment_history: Vec<RentPaymentRow>,
    lease_violations: Vec<LeaseViolationRow>,
    renewal_status: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct LeaseRowWithId {
    record_id: String,
    property_id: String,
    tenant_id: String,
    rent: f64,
    start_date: String,
    end_date: String,
    digital_signature: String,
    security_deposit: f64,
    utility_responsibilities: Vec<String>,
    rent_payment_history: Vec<RentPaymentRow>,
    lease_violations: Vec<LeaseViolationRow>,
    renewal_status: String,
    created_at: DateTime<Utc>,
}

fn parse_uuid(field: &str, s: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}

impl LeaseRow {
    fn into_lease(self, id: Uuid) -> Result<LeaseAgreement, DbError> {
        Ok(LeaseAgreement {
            id,
            property_id: parse_uuid("property", &self.property_id)?,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            rent: self.rent,
            start_date: self.start_date,
            end_date: self.end_date,
            digital_signature: self.digital_signature,
            security_deposit: self.security_deposit,
            utility_responsibilities: self.utility_responsibilities,
            rent_payment_history: self
                .rent_payment_history
                .into_iter()
                .map(Into::into)
                .collect(),
            lease_violations: self.lease_violations.into_iter().map(Into::into).collect(),
            renewal_status: self.renewal_status,
            created_at: self.created_at,
        })
    }
}

impl LeaseRowWithId {
    fn try_into_lease(self) -> Result<LeaseAgreement, DbError> {
        let id = parse_uuid("lease", &self.record_id)?;
        Ok(LeaseAgreement {
            id,
            property_id: parse_uuid("property", &self.property_id)?,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            rent: self.rent,
            start_date: self.start_date,
            end_date: self.end_date,
            digital_signature: self.digital_signature,
            security_deposit: self.security_deposit,
            utility_responsibilities: self.utility_responsibilities,
            rent_payment_history: self
                .rent_payment_history
                .into_iter()
                .map(Into::into)
                .collect(),
            lease_violations: self.lease_violations.into_iter().map(Into::into).collect(),
            renewal_status: self.renewal_status,
            created_at: self.created_at,
        })
    }
}

/// Presence checks for the creation payload. Zero rent or deposit counts
/// as missing.
fn validate_create(input: &CreateLeaseAgreement) -> DomusResult<()> {
    require_f64("rent", input.rent)?;
    require_str("start_date", &input.start_date)?;
    require_str("end_date", &input.end_date)?;
    require_str("digital_signature", &input.digital_signature)?;
    require_f64("security_deposit", input.security_deposit)?;
    Ok(())
}

/// SurrealDB implementation of the LeaseAgreement repository.
#[derive(Clone)]
pub struct SurrealLeaseAgreementRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLeaseAgreementRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> LeaseAgreementRepository for SurrealLeaseAgreementRepository<C> {
    async fn create(&self, input: CreateLeaseAgreement) -> DomusResult<LeaseAgreement> {
        validate_create(&input)?;

        // Referential checks before date validation: tenant, then property.
        let tenant_id = input.tenant_id.to_string();
        if !record_exists(&self.db, "tenant", &tenant_id).await? {
            return Err(DomusError::not_found("tenant", &tenant_id));
        }
        let property_id = input.property_id.to_string();
        if !record_exists(&self.db, "property", &property_id).await? {
            return Err(DomusError::not_found("property", &property_id));
        }

        // ISO-8601 date strings order lexicographically.
        if input.start_date >= input.end_date {
            return Err(DomusError::InvalidDate {
                start: input.start_date,
                end: input.end_date,
            });
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('lease_agreement', $id) SET \
                 property_id = $property_id, tenant_id = $tenant_id, \
                 rent = $rent, start_date = $start_date, \
                 end_date = $end_date, \
                 digital_signature = $digital_signature, \
                 security_deposit = $security_deposit, \
                 utility_responsibilities = $utility_responsibilities, \
                 rent_payment_history = [], lease_violations = [], \
                 renewal_status = 'pending'",
            )
            .bind(("id", id_str.clone()))
            .bind(("property_id", property_id))
            .bind(("tenant_id", tenant_id))
            .bind(("rent", input.rent))
            .bind(("start_date", input.start_date))
            .bind(("end_date", input.end_date))
            .bind(("digital_signature", input.digital_signature))
            .bind(("security_deposit", input.security_deposit))
            .bind((
                "utility_responsibilities",
                input.utility_responsibilities,
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<LeaseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_lease(id)?)
    }

    async fn get_all(&self) -> DomusResult<Vec<LeaseAgreement>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM lease_agreement")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeaseRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_lease().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<LeaseAgreement> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('lease_agreement', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeaseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_lease(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateLeaseAgreement) -> DomusResult<LeaseAgreement> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.rent.is_some() {
            sets.push("rent = $rent");
        }
        if input.start_date.is_some() {
            sets.push("start_date = $start_date");
        }
        if input.end_date.is_some() {
            sets.push("end_date = $end_date");
        }
        if input.digital_signature.is_some() {
            sets.push("digital_signature = $digital_signature");
        }
        if input.security_deposit.is_some() {
            sets.push("security_deposit = $security_deposit");
        }
        if input.utility_responsibilities.is_some() {
            sets.push("utility_responsibilities = $utility_responsibilities");
        }
        if input.rent_payment_history.is_some() {
            sets.push("rent_payment_history = $rent_payment_history");
        }
        if input.lease_violations.is_some() {
            sets.push("lease_violations = $lease_violations");
        }
        if input.renewal_status.is_some() {
            sets.push("renewal_status = $renewal_status");
        }

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('lease_agreement', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(rent) = input.rent {
            builder = builder.bind(("rent", rent));
        }
        if let Some(start_date) = input.start_date {
            builder = builder.bind(("start_date", start_date));
        }
        if let Some(end_date) = input.end_date {
            builder = builder.bind(("end_date", end_date));
        }
        if let Some(digital_signature) = input.digital_signature {
            builder = builder.bind(("digital_signature", digital_signature));
        }
        if let Some(security_deposit) = input.security_deposit {
            builder = builder.bind(("security_deposit", security_deposit));
        }
        if let Some(utilities) = input.utility_responsibilities {
            builder = builder.bind(("utility_responsibilities", utilities));
        }
        if let Some(history) = input.rent_payment_history {
            let rows: Vec<RentPaymentRow> = history.into_iter().map(Into::into).collect();
            builder = builder.bind(("rent_payment_history", rows));
        }
        if let Some(violations) = input.lease_violations {
            let rows: Vec<LeaseViolationRow> = violations.into_iter().map(Into::into).collect();
            builder = builder.bind(("lease_violations", rows));
        }
        if let Some(renewal_status) = input.renewal_status {
            builder = builder.bind(("renewal_status", renewal_status));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<LeaseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_lease(id)?)
    }

    async fn delete(&self, id: Uuid) -> DomusResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('lease_agreement', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeaseRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::not_found(ENTITY, &id_str));
        }

        Ok(())
    }

    async fn record_rent_payment(&self, id: Uuid, amount: f64) -> DomusResult<LeaseAgreement> {
        let lease = self.get_by_id(id).await?;

        if lease.renewal_status == RENEWAL_COMPLETED {
            return Err(DomusError::PaymentCompleted { id: id.to_string() });
        }
        // Exact match only; partial payments are not a thing here.
        if amount != lease.rent {
            return Err(DomusError::PaymentFailed {
                expected: lease.rent,
            });
        }

        let payment = RentPaymentRow {
            payment_date: Utc::now(),
            amount,
            status: "completed".into(),
        };

        // Single store-side append so the entry cannot be lost to an
        // interleaved writer.
        let mut result = self
            .db
            .query(
                "UPDATE type::record('lease_agreement', $id) \
                 SET rent_payment_history += $payment",
            )
            .bind(("id", id.to_string()))
            .bind(("payment", payment))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeaseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, id))?;

        Ok(row.into_lease(id)?)
    }
}
