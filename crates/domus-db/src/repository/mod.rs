//! SurrealDB repository implementations, one per entity table.

mod document;
mod financial_transaction;
mod lease_agreement;
mod maintenance_request;
mod property;
mod tenant;

pub use document::SurrealDocumentRepository;
pub use financial_transaction::SurrealFinancialTransactionRepository;
pub use lease_agreement::SurrealLeaseAgreementRepository;
pub use maintenance_request::SurrealMaintenanceRequestRepository;
pub use property::SurrealPropertyRepository;
pub use tenant::SurrealTenantRepository;

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// Row struct carrying only a record id, used for existence checks.
#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

/// Check whether a record exists in `table` under the given string id.
///
/// Referential fields are validated with this at write time only;
/// deletions elsewhere never consult it.
pub(crate) async fn record_exists<C: Connection>(
    db: &Surreal<C>,
    table: &str,
    id: &str,
) -> Result<bool, DbError> {
    let mut result = db
        .query("SELECT meta::id(id) AS record_id FROM type::record($table, $id)")
        .bind(("table", table.to_string()))
        .bind(("id", id.to_string()))
        .await?;

    let rows: Vec<IdRow> = result.take(0)?;
    Ok(!rows.is_empty())
}
