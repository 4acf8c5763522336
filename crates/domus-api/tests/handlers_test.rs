//! End-to-end handler tests over an in-memory SurrealDB.
//!
//! These exercise the full stack: handler -> repository -> database,
//! and check the wire shape of the response envelope via serde_json.

use domus_api::{ApiResponse, ErrorKind, Handlers};
use domus_core::models::document::{CreateDocument, DocumentMetadata, UpdateDocument};
use domus_core::models::financial_transaction::CreateFinancialTransaction;
use domus_core::models::lease_agreement::{CreateLeaseAgreement, UpdateLeaseAgreement};
use domus_core::models::maintenance_request::CreateMaintenanceRequest;
use domus_core::models::property::{CreateProperty, TaxDetails, UpdateProperty};
use domus_core::models::tenant::CreateTenant;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> Handlers<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    domus_db::run_migrations(&db).await.unwrap();
    Handlers::new(db)
}

fn sample_property() -> CreateProperty {
    CreateProperty {
        address: "12 Via Roma, Milan".to_string(),
        valuation: 450_000.0,
        status: "vacant".to_string(),
        square_footage: 1100.0,
        bedrooms: 3,
        bathrooms: 2.0,
        amenities: vec!["balcony".to_string()],
        images: vec![],
        property_type: "residential".to_string(),
        last_inspection: String::new(),
        insurance_info: String::new(),
        tax_details: TaxDetails {
            annual_amount: 3200.0,
            last_paid: "2024-01-15".to_string(),
            next_due: "2025-01-15".to_string(),
        },
    }
}

fn sample_tenant() -> CreateTenant {
    CreateTenant {
        name: "Marco Bianchi".to_string(),
        email: "marco@example.com".to_string(),
        phone: "555-0142".to_string(),
        emergency_contact: String::new(),
        background_check_status: "clear".to_string(),
        credit_score: 720,
        rental_history: vec![],
        payment_preferences: String::new(),
    }
}

fn sample_lease(property_id: Uuid, tenant_id: Uuid) -> CreateLeaseAgreement {
    CreateLeaseAgreement {
        property_id,
        tenant_id,
        rent: 1500.0,
        start_date: "2024-03-01".to_string(),
        end_date: "2025-02-28".to_string(),
        digital_signature: "sig-abc".to_string(),
        security_deposit: 3000.0,
        utility_responsibilities: vec!["electricity".to_string()],
    }
}

// -----------------------------------------------------------------------
// Envelope wire shape
// -----------------------------------------------------------------------

#[tokio::test]
async fn success_envelope_serializes_with_status_and_data() {
    let handlers = setup().await;

    let response = handlers.create_property("owner-1", sample_property()).await;
    assert!(response.is_success());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["address"], "12 Via Roma, Milan");
    assert_eq!(json["data"]["owner"], "owner-1");
    assert_eq!(json["data"]["property_type"], "residential");
    // The envelope never carries error fields on success.
    assert!(json.get("kind").is_none());
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn error_envelope_serializes_with_kind_and_message() {
    let handlers = setup().await;

    let response = handlers.get_property_by_id(Uuid::new_v4()).await;
    assert!(!response.is_success());
    assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "not_found");
    assert!(json["message"].as_str().unwrap().contains("not found"));
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn envelope_round_trips_through_json() {
    let handlers = setup().await;

    let created = handlers
        .create_tenant(sample_tenant())
        .await
        .into_data()
        .unwrap();

    let response = handlers.get_tenant_by_id(created.id).await;
    let json = serde_json::to_string(&response).unwrap();
    let parsed: ApiResponse<domus_core::models::tenant::Tenant> =
        serde_json::from_str(&json).unwrap();
    let tenant = parsed.into_data().unwrap();
    assert_eq!(tenant.id, created.id);
    assert_eq!(tenant.name, "Marco Bianchi");
}

// -----------------------------------------------------------------------
// Error kind classification
// -----------------------------------------------------------------------

#[tokio::test]
async fn zero_valued_required_field_reports_invalid_payload() {
    let handlers = setup().await;

    let mut payload = sample_property();
    payload.bedrooms = 0;
    let response = handlers.create_property("owner-1", payload).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::InvalidPayload));
}

#[tokio::test]
async fn unknown_property_type_filter_reports_not_found() {
    let handlers = setup().await;
    handlers
        .create_property("owner-1", sample_property())
        .await
        .into_data()
        .unwrap();

    // An unrecognized type string can never match stored records, so the
    // filter reports the same outcome as an empty result set.
    let response = handlers.get_properties_by_type("castle").await;
    assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));

    let matched = handlers
        .get_properties_by_type("residential")
        .await
        .into_data()
        .unwrap();
    assert_eq!(matched.len(), 1);
}

#[tokio::test]
async fn reversed_lease_dates_report_invalid_date() {
    let handlers = setup().await;
    let property = handlers
        .create_property("owner-1", sample_property())
        .await
        .into_data()
        .unwrap();
    let tenant = handlers
        .create_tenant(sample_tenant())
        .await
        .into_data()
        .unwrap();

    let mut payload = sample_lease(property.id, tenant.id);
    payload.start_date = "2025-02-28".to_string();
    payload.end_date = "2024-03-01".to_string();
    let response = handlers.create_lease_agreement(payload).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::InvalidDate));
}

#[tokio::test]
async fn mismatched_payment_reports_payment_failed() {
    let handlers = setup().await;
    let property = handlers
        .create_property("owner-1", sample_property())
        .await
        .into_data()
        .unwrap();
    let tenant = handlers
        .create_tenant(sample_tenant())
        .await
        .into_data()
        .unwrap();
    let lease = handlers
        .create_lease_agreement(sample_lease(property.id, tenant.id))
        .await
        .into_data()
        .unwrap();

    let response = handlers.record_rent_payment(lease.id, 999.0).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::PaymentFailed));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["kind"], "payment_failed");
}

#[tokio::test]
async fn completed_lease_reports_payment_completed() {
    let handlers = setup().await;
    let property = handlers
        .create_property("owner-1", sample_property())
        .await
        .into_data()
        .unwrap();
    let tenant = handlers
        .create_tenant(sample_tenant())
        .await
        .into_data()
        .unwrap();
    let lease = handlers
        .create_lease_agreement(sample_lease(property.id, tenant.id))
        .await
        .into_data()
        .unwrap();

    let update = UpdateLeaseAgreement {
        renewal_status: Some("completed".to_string()),
        ..Default::default()
    };
    handlers
        .update_lease_agreement(lease.id, update)
        .await
        .into_data()
        .unwrap();

    let response = handlers.record_rent_payment(lease.id, 1500.0).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::PaymentCompleted));
}

// -----------------------------------------------------------------------
// Full lifecycle through the handlers
// -----------------------------------------------------------------------

#[tokio::test]
async fn full_property_lifecycle() {
    let handlers = setup().await;

    // Create one property and one tenant.
    let property = handlers
        .create_property("admin", sample_property())
        .await
        .into_data()
        .unwrap();
    let tenant = handlers
        .create_tenant(sample_tenant())
        .await
        .into_data()
        .unwrap();

    // Sign a lease and pay two months of rent.
    let lease = handlers
        .create_lease_agreement(sample_lease(property.id, tenant.id))
        .await
        .into_data()
        .unwrap();
    assert_eq!(lease.renewal_status, "pending");
    assert!(lease.rent_payment_history.is_empty());

    handlers
        .record_rent_payment(lease.id, 1500.0)
        .await
        .into_data()
        .unwrap();
    let lease = handlers
        .record_rent_payment(lease.id, 1500.0)
        .await
        .into_data()
        .unwrap();
    assert_eq!(lease.rent_payment_history.len(), 2);

    // Record an expense against the property.
    let tx = handlers
        .create_financial_transaction(
            "admin",
            CreateFinancialTransaction {
                property_id: property.id,
                amount: 350.0,
                transaction_type: "expense".to_string(),
                description: "Boiler repair".to_string(),
                category: "maintenance".to_string(),
                payment_method: "bank_transfer".to_string(),
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(tx.recorded_by, "admin");

    let by_property = handlers
        .get_transactions_by_property_id(property.id)
        .await
        .into_data()
        .unwrap();
    assert_eq!(by_property.len(), 1);

    // File and resolve a maintenance request.
    let request = handlers
        .create_maintenance_request(CreateMaintenanceRequest {
            property_id: property.id,
            description: "Boiler leaking".to_string(),
            priority: "high".to_string(),
            images: vec![],
        })
        .await
        .into_data()
        .unwrap();
    assert_eq!(request.status, "pending");

    // Attach a document.
    let document = handlers
        .create_document(CreateDocument {
            property_id: property.id,
            document_type: "lease_copy".to_string(),
            content: "base64:...".to_string(),
            metadata: DocumentMetadata {
                title: "Signed lease".to_string(),
                tags: vec!["lease".to_string()],
            },
        })
        .await
        .into_data()
        .unwrap();
    let document = handlers
        .update_document(
            document.id,
            UpdateDocument {
                content: Some("base64:v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(document.content, "base64:v2");

    // Revalue the property.
    let property = handlers
        .update_property(
            property.id,
            UpdateProperty {
                valuation: Some(475_000.0),
                status: Some("occupied".to_string()),
                ..Default::default()
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(property.valuation, 475_000.0);
    assert_eq!(property.status, "occupied");

    // Delete the property. Dependent records are untouched.
    let deleted = handlers.delete_property(property.id).await;
    assert!(deleted.is_success());
    let second = handlers.delete_property(property.id).await;
    assert_eq!(second.error_kind(), Some(ErrorKind::NotFound));

    let leases = handlers
        .get_all_lease_agreements()
        .await
        .into_data()
        .unwrap();
    assert_eq!(leases.len(), 1);
    let transactions = handlers
        .get_all_financial_transactions()
        .await
        .into_data()
        .unwrap();
    assert_eq!(transactions.len(), 1);
    let requests = handlers
        .get_all_maintenance_requests()
        .await
        .into_data()
        .unwrap();
    assert_eq!(requests.len(), 1);
    let documents = handlers.get_all_documents().await.into_data().unwrap();
    assert_eq!(documents.len(), 1);
}

#[tokio::test]
async fn document_metadata_is_validated_then_dropped() {
    let handlers = setup().await;
    let property = handlers
        .create_property("owner-1", sample_property())
        .await
        .into_data()
        .unwrap();

    // Missing title fails validation.
    let response = handlers
        .create_document(CreateDocument {
            property_id: property.id,
            document_type: "deed".to_string(),
            content: "pdf".to_string(),
            metadata: DocumentMetadata::default(),
        })
        .await;
    assert_eq!(response.error_kind(), Some(ErrorKind::InvalidPayload));

    // A valid title is accepted but not persisted anywhere on the record.
    let document = handlers
        .create_document(CreateDocument {
            property_id: property.id,
            document_type: "deed".to_string(),
            content: "pdf".to_string(),
            metadata: DocumentMetadata {
                title: "Property deed".to_string(),
                tags: vec![],
            },
        })
        .await
        .into_data()
        .unwrap();
    let json = serde_json::to_value(&document).unwrap();
    assert!(json.get("metadata").is_none());
    assert!(json.get("title").is_none());
}

#[tokio::test]
async fn empty_listings_report_not_found() {
    let handlers = setup().await;

    for response in [
        handlers.get_all_properties().await.error_kind(),
        handlers
            .get_all_tenants()
            .await
            .error_kind(),
        handlers.get_all_lease_agreements().await.error_kind(),
    ] {
        assert_eq!(response, Some(ErrorKind::NotFound));
    }
}
