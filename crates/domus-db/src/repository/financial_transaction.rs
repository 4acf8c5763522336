//! SurrealDB implementation of [`FinancialTransactionRepository`].
//!
//! Transactions are append-only: created with a creation-time date stamp
//! and the caller identity in `recorded_by`, then read back by id or by
//! referenced property. The property must exist at creation time, but a
//! later property deletion leaves its transactions retrievable.

use chrono::{DateTime, Utc};
use domus_core::error::{DomusError, DomusResult};
use domus_core::models::financial_transaction::{
    CreateFinancialTransaction, FinancialTransaction,
};
use domus_core::repository::FinancialTransactionRepository;
use domus_core::validate::{require_f64, require_str};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::record_exists;

const ENTITY: &str = "financial transaction";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TransactionRow {
    property_id: String,
    date: DateTime<Utc>,
    amount: f64,
    transaction_type: String,
    description: String,
    category: String,
    payment_method: String,
    recorded_by: String,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TransactionRowWithId {
    record_id: String,
    property_id: String,
    date: DateTime<Utc>,
    amount: f64,
    transaction_type: String,
    description: String,
    category: String,
    payment_method: String,
    recorded_by: String,
}

impl TransactionRow {
    fn into_transaction(self, id: Uuid) -> Result<FinancialTransaction, DbError> {
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(FinancialTransaction {
            id,
            property_id,
            date: self.date,
            amount: self.amount,
            transaction_type: self.transaction_type,
            description: self.description,
            category: self.category,
            payment_method: self.payment_method,
            recorded_by: self.recorded_by,
        })
    }
}

impl TransactionRowWithId {
    fn try_into_transaction(self) -> Result<FinancialTransaction, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(FinancialTransaction {
            id,
            property_id,
            date: self.date,
            amount: self.amount,
            transaction_type: self.transaction_type,
            description: self.description,
            category: self.category,
            payment_method: self.payment_method,
            recorded_by: self.recorded_by,
        })
    }
}

/// Presence checks for the creation payload. Zero amount counts as
/// missing.
fn validate_create(input: &CreateFinancialTransaction) -> DomusResult<()> {
    require_f64("amount", input.amount)?;
    require_str("transaction_type", &input.transaction_type)?;
    require_str("description", &input.description)?;
    require_str("category", &input.category)?;
    require_str("payment_method", &input.payment_method)?;
    Ok(())
}

/// SurrealDB implementation of the FinancialTransaction repository.
#[derive(Clone)]
pub struct SurrealFinancialTransactionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealFinancialTransactionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> FinancialTransactionRepository
    for SurrealFinancialTransactionRepository<C>
{
    async fn create(
        &self,
        recorded_by: &str,
        input: CreateFinancialTransaction,
    ) -> DomusResult<FinancialTransaction> {
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
                "CREATE type::record('financial_transaction', $id) SET \
                 property_id = $property_id, date = $date, \
                 amount = $amount, transaction_type = $transaction_type, \
                 description = $description, category = $category, \
                 payment_method = $payment_method, \
                 recorded_by = $recorded_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("property_id", property_id))
            .bind(("date", Utc::now()))
            .bind(("amount", input.amount))
            .bind(("transaction_type", input.transaction_type))
            .bind(("description", input.description))
            .bind(("category", input.category))
            .bind(("payment_method", input.payment_method))
            .bind(("recorded_by", recorded_by.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TransactionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_transaction(id)?)
    }

    async fn get_all(&self) -> DomusResult<Vec<FinancialTransaction>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM financial_transaction")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TransactionRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_transaction().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<FinancialTransaction> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('financial_transaction', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TransactionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_transaction(id)?)
    }

    async fn get_by_property(
        &self,
        property_id: Uuid,
    ) -> DomusResult<Vec<FinancialTransaction>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM financial_transaction \
                 WHERE property_id = $property_id",
            )
            .bind(("property_id", property_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TransactionRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_transaction().map_err(DomusError::from))
            .collect()
    }
}
