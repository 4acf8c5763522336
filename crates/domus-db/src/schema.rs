//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enum-like fields are stored as strings
//! with ASSERT constraints. Sub-record lists (rental history, payment
//! history, violations, work orders) are arrays of flexible objects so
//! their contents survive schemafull filtering.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Properties
-- =======================================================================
DEFINE TABLE property SCHEMAFULL;
DEFINE FIELD address ON TABLE property TYPE string;
DEFINE FIELD owner ON TABLE property TYPE string;
DEFINE FIELD valuation ON TABLE property TYPE float;
DEFINE FIELD status ON TABLE property TYPE string;
DEFINE FIELD square_footage ON TABLE property TYPE float;
DEFINE FIELD bedrooms ON TABLE property TYPE int;
DEFINE FIELD bathrooms ON TABLE property TYPE float;
DEFINE FIELD amenities ON TABLE property TYPE array DEFAULT [];
DEFINE FIELD images ON TABLE property TYPE array DEFAULT [];
DEFINE FIELD property_type ON TABLE property TYPE string \
    ASSERT $value IN ['residential', 'commercial'];
DEFINE FIELD last_inspection ON TABLE property TYPE string DEFAULT '';
DEFINE FIELD insurance_info ON TABLE property TYPE string DEFAULT '';
DEFINE FIELD tax_details ON TABLE property TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE property TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Tenants (append-only public surface)
-- =======================================================================
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD email ON TABLE tenant TYPE string;
DEFINE FIELD phone ON TABLE tenant TYPE string;
DEFINE FIELD emergency_contact ON TABLE tenant TYPE string DEFAULT '';
DEFINE FIELD background_check_status ON TABLE tenant TYPE string;
DEFINE FIELD credit_score ON TABLE tenant TYPE int;
DEFINE FIELD rental_history ON TABLE tenant TYPE array DEFAULT [];
DEFINE FIELD rental_history.* ON TABLE tenant TYPE object FLEXIBLE;
DEFINE FIELD payment_preferences ON TABLE tenant TYPE string DEFAULT '';
DEFINE FIELD created_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Lease Agreements
-- =======================================================================
DEFINE TABLE lease_agreement SCHEMAFULL;
DEFINE FIELD property_id ON TABLE lease_agreement TYPE string;
DEFINE FIELD tenant_id ON TABLE lease_agreement TYPE string;
DEFINE FIELD rent ON TABLE lease_agreement TYPE float;
DEFINE FIELD start_date ON TABLE lease_agreement TYPE string;
DEFINE FIELD end_date ON TABLE lease_agreement TYPE string;
DEFINE FIELD digital_signature ON TABLE lease_agreement TYPE string;
DEFINE FIELD security_deposit ON TABLE lease_agreement TYPE float;
DEFINE FIELD utility_responsibilities ON TABLE lease_agreement \
    TYPE array DEFAULT [];
DEFINE FIELD rent_payment_history ON TABLE lease_agreement \
    TYPE array DEFAULT [];
DEFINE FIELD rent_payment_history.* ON TABLE lease_agreement \
    TYPE object FLEXIBLE;
DEFINE FIELD lease_violations ON TABLE lease_agreement \
    TYPE array DEFAULT [];
DEFINE FIELD lease_violations.* ON TABLE lease_agreement \
    TYPE object FLEXIBLE;
DEFINE FIELD renewal_status ON TABLE lease_agreement TYPE string \
    DEFAULT 'pending';
DEFINE FIELD created_at ON TABLE lease_agreement TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_lease_property ON TABLE lease_agreement \
    COLUMNS property_id;
DEFINE INDEX idx_lease_tenant ON TABLE lease_agreement \
    COLUMNS tenant_id;

-- =======================================================================
-- Financial Transactions (append-only public surface)
-- =======================================================================
DEFINE TABLE financial_transaction SCHEMAFULL;
DEFINE FIELD property_id ON TABLE financial_transaction TYPE string;
DEFINE FIELD date ON TABLE financial_transaction TYPE datetime;
DEFINE FIELD amount ON TABLE financial_transaction TYPE float;
DEFINE FIELD transaction_type ON TABLE financial_transaction TYPE string;
DEFINE FIELD description ON TABLE financial_transaction TYPE string;
DEFINE FIELD category ON TABLE financial_transaction TYPE string;
DEFINE FIELD payment_method ON TABLE financial_transaction TYPE string;
DEFINE FIELD recorded_by ON TABLE financial_transaction TYPE string;
DEFINE INDEX idx_transaction_property ON TABLE financial_transaction \
    COLUMNS property_id;

-- =======================================================================
-- Maintenance Requests
-- =======================================================================
DEFINE TABLE maintenance_request SCHEMAFULL;
DEFINE FIELD property_id ON TABLE maintenance_request TYPE string;
DEFINE FIELD description ON TABLE maintenance_request TYPE string;
DEFINE FIELD status ON TABLE maintenance_request TYPE string \
    DEFAULT 'pending';
DEFINE FIELD priority ON TABLE maintenance_request TYPE string;
DEFINE FIELD assigned_to ON TABLE maintenance_request TYPE string \
    DEFAULT '';
DEFINE FIELD estimated_cost ON TABLE maintenance_request TYPE float \
    DEFAULT 0.0;
DEFINE FIELD actual_cost ON TABLE maintenance_request TYPE float \
    DEFAULT 0.0;
DEFINE FIELD completion_date ON TABLE maintenance_request TYPE string \
    DEFAULT '';
DEFINE FIELD tenant_feedback ON TABLE maintenance_request TYPE string \
    DEFAULT '';
DEFINE FIELD images ON TABLE maintenance_request TYPE array DEFAULT [];
DEFINE FIELD work_orders ON TABLE maintenance_request TYPE array \
    DEFAULT [];
DEFINE FIELD work_orders.* ON TABLE maintenance_request \
    TYPE object FLEXIBLE;
DEFINE FIELD created_at ON TABLE maintenance_request TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_maintenance_property ON TABLE maintenance_request \
    COLUMNS property_id;

-- =======================================================================
-- Documents
-- =======================================================================
DEFINE TABLE document SCHEMAFULL;
DEFINE FIELD property_id ON TABLE document TYPE string;
DEFINE FIELD document_type ON TABLE document TYPE string;
DEFINE FIELD content ON TABLE document TYPE string;
DEFINE INDEX idx_document_property ON TABLE document \
    COLUMNS property_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// The raw v1 schema DDL, exposed for inspection and tests.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
