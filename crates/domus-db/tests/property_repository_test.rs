//! Integration tests for the Property repository using in-memory
//! SurrealDB.

use domus_core::error::DomusError;
use domus_core::models::property::{
    CreateProperty, PropertyType, TaxDetails, UpdateProperty,
};
use domus_core::repository::PropertyRepository;
use domus_db::repository::SurrealPropertyRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    domus_db::run_migrations(&db).await.unwrap();
    db
}

fn sample_property() -> CreateProperty {
    CreateProperty {
        address: "12 Main St".into(),
        valuation: 450_000.0,
        status: "available".into(),
        square_footage: 1800.0,
        bedrooms: 3,
        bathrooms: 2.5,
        amenities: vec!["parking".into(), "garden".into()],
        images: vec!["front.jpg".into()],
        property_type: "residential".into(),
        last_inspection: "2024-03-15".into(),
        insurance_info: "policy-889".into(),
        tax_details: TaxDetails {
            annual_amount: 5200.0,
            last_paid: "2024-01-15".into(),
            next_due: "2025-01-15".into(),
        },
    }
}

#[tokio::test]
async fn create_and_get_property() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let property = repo.create("agent-1", sample_property()).await.unwrap();
    assert_eq!(property.address, "12 Main St");
    assert_eq!(property.owner, "agent-1");
    assert_eq!(property.property_type, PropertyType::Residential);
    assert_eq!(property.tax_details.annual_amount, 5200.0);

    let fetched = repo.get_by_id(property.id).await.unwrap();
    assert_eq!(fetched.id, property.id);
    assert_eq!(fetched.address, property.address);
    assert_eq!(fetched.amenities, property.amenities);
    assert_eq!(fetched.tax_details, property.tax_details);
}

#[tokio::test]
async fn get_all_empty_table_is_not_found() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let result = repo.get_all().await;
    assert!(matches!(result, Err(DomusError::Empty { .. })));
}

#[tokio::test]
async fn get_all_tracks_creates_and_deletes() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let a = repo.create("agent-1", sample_property()).await.unwrap();
    let _b = repo.create("agent-1", sample_property()).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap().len(), 2);

    repo.delete(a.id).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_unknown_id_is_not_found() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomusError::NotFound { .. })));
}

// Numeric zero counts as a missing required field.
// That quirk is reproduced on purpose.
#[tokio::test]
async fn zero_bedrooms_is_rejected_as_missing() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let mut input = sample_property();
    input.bedrooms = 0;
    let result = repo.create("agent-1", input).await;
    assert!(matches!(result, Err(DomusError::InvalidPayload { .. })));
}

#[tokio::test]
async fn invalid_property_type_is_rejected() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let mut input = sample_property();
    input.property_type = "industrial".into();
    let result = repo.create("agent-1", input).await;
    assert!(matches!(result, Err(DomusError::InvalidPayload { .. })));
}

#[tokio::test]
async fn incomplete_tax_details_are_rejected() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let mut input = sample_property();
    input.tax_details.next_due = String::new();
    let result = repo.create("agent-1", input).await;
    assert!(matches!(result, Err(DomusError::InvalidPayload { .. })));
}

#[tokio::test]
async fn get_by_type_filters_exactly() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    repo.create("agent-1", sample_property()).await.unwrap();
    let mut commercial = sample_property();
    commercial.property_type = "commercial".into();
    commercial.address = "401 Market Sq".into();
    repo.create("agent-1", commercial).await.unwrap();

    let residential = repo.get_by_type(PropertyType::Residential).await.unwrap();
    assert_eq!(residential.len(), 1);
    assert_eq!(residential[0].address, "12 Main St");

    let commercial = repo.get_by_type(PropertyType::Commercial).await.unwrap();
    assert_eq!(commercial.len(), 1);
    assert_eq!(commercial[0].address, "401 Market Sq");
}

#[tokio::test]
async fn get_by_type_with_no_matches_is_not_found() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    repo.create("agent-1", sample_property()).await.unwrap();

    let result = repo.get_by_type(PropertyType::Commercial).await;
    assert!(matches!(result, Err(DomusError::Empty { .. })));
}

#[tokio::test]
async fn update_merges_only_present_fields() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let property = repo.create("agent-1", sample_property()).await.unwrap();

    let updated = repo
        .update(
            property.id,
            UpdateProperty {
                status: Some("leased".into()),
                valuation: Some(475_000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, "leased");
    assert_eq!(updated.valuation, 475_000.0);
    // Everything else untouched.
    assert_eq!(updated.address, property.address);
    assert_eq!(updated.bedrooms, property.bedrooms);
    assert_eq!(updated.tax_details, property.tax_details);
    assert_eq!(updated.owner, "agent-1");
}

#[tokio::test]
async fn update_replaces_tax_details_wholesale() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let property = repo.create("agent-1", sample_property()).await.unwrap();

    let new_tax = TaxDetails {
        annual_amount: 6100.0,
        last_paid: "2025-01-10".into(),
        next_due: "2026-01-10".into(),
    };
    let updated = repo
        .update(
            property.id,
            UpdateProperty {
                tax_details: Some(new_tax.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.tax_details, new_tax);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_leaves_table_unchanged() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    repo.create("agent-1", sample_property()).await.unwrap();

    let result = repo
        .update(
            Uuid::new_v4(),
            UpdateProperty {
                status: Some("leased".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DomusError::NotFound { .. })));
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let result = repo.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomusError::NotFound { .. })));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let db = setup().await;
    let repo = SurrealPropertyRepository::new(db);

    let property = repo.create("agent-1", sample_property()).await.unwrap();
    repo.delete(property.id).await.unwrap();

    let result = repo.get_by_id(property.id).await;
    assert!(matches!(result, Err(DomusError::NotFound { .. })));
}
