//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    domus_db::run_migrations(&db).await.unwrap();

    // Verify that all entity tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("property"), "missing property table");
    assert!(info_str.contains("tenant"), "missing tenant table");
    assert!(
        info_str.contains("lease_agreement"),
        "missing lease_agreement table"
    );
    assert!(
        info_str.contains("financial_transaction"),
        "missing financial_transaction table"
    );
    assert!(
        info_str.contains("maintenance_request"),
        "missing maintenance_request table"
    );
    assert!(info_str.contains("document"), "missing document table");

    // Verify migration was recorded.
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail.
    domus_db::run_migrations(&db).await.unwrap();
    domus_db::run_migrations(&db).await.unwrap();

    // Verify only one migration record exists.
    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn can_create_record_after_migration() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    domus_db::run_migrations(&db).await.unwrap();

    // Create a tenant record to verify the schema accepts valid rows.
    db.query(
        "CREATE tenant SET \
         name = 'Jane Renter', \
         email = 'jane@example.com', \
         phone = '555-0100', \
         credit_score = 710, \
         background_check_status = 'clear', \
         rental_history = []",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let mut result = db
        .query("SELECT * FROM tenant WHERE email = 'jane@example.com'")
        .await
        .unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn property_type_assert_rejects_unknown_values() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    domus_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE property SET \
             address = '1 Test St', \
             property_type = 'castle', \
             status = 'vacant', \
             valuation = 100000.0, \
             square_footage = 900.0, \
             bedrooms = 2, \
             bathrooms = 1.0, \
             amenities = [], \
             images = [], \
             owner = 'owner-1', \
             last_inspection = '', \
             insurance_info = '', \
             tax_details = { annual_amount: 1200.0, last_paid: '2024-01-01', next_due: '2025-01-01' }",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "unknown property_type should be rejected");
}
