//! SurrealDB implementation of [`PropertyRepository`].

use chrono::{DateTime, Utc};
use domus_core::error::{DomusError, DomusResult};
use domus_core::models::property::{
    CreateProperty, Property, PropertyType, TaxDetails, UpdateProperty,
};
use domus_core::repository::PropertyRepository;
use domus_core::validate::{require_f64, require_str, require_u32};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "property";

#[derive(Debug, Clone, SurrealValue)]
struct TaxDetailsRow {
    annual_amount: f64,
    last_paid: String,
    next_due: String,
}

impl From<TaxDetails> for TaxDetailsRow {
    fn from(t: TaxDetails) -> Self {
        Self {
            annual_amount: t.annual_amount,
            last_paid: t.last_paid,
            next_due: t.next_due,
        }
    }
}

impl From<TaxDetailsRow> for TaxDetails {
    fn from(t: TaxDetailsRow) -> Self {
        Self {
            annual_amount: t.annual_amount,
            last_paid: t.last_paid,
            next_due: t.next_due,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct PropertyRow {
    address: String,
    owner: String,
    valuation: f64,
    status: String,
    square_footage: f64,
    bedrooms: u32,
    bathrooms: f64,
    amenities: Vec<String>,
    images: Vec<String>,
    property_type: String,
    last_inspection: String,
    insurance_info: String,
    tax_details: TaxDetailsRow,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct PropertyRowWithId {
    record_id: String,
    address: String,
    owner: String,
    valuation: f64,
    status: String,
    square_footage: f64,
    bedrooms: u32,
    bathrooms: f64,
    amenities: Vec<String>,
    images: Vec<String>,
    property_type: String,
    last_inspection: String,
    insurance_info: String,
    tax_details: TaxDetailsRow,
    created_at: DateTime<Utc>,
}

fn parse_type(s: &str) -> Result<PropertyType, DbError> {
    PropertyType::parse(s).ok_or_else(|| DbError::Decode(format!("unknown property type: {s}")))
}

impl PropertyRow {
    fn into_property(self, id: Uuid) -> Result<Property, DbError> {
        Ok(Property {
            id,
            address: self.address,
            owner: self.owner,
            valuation: self.valuation,
            status: self.status,
            square_footage: self.square_footage,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            images: self.images,
            property_type: parse_type(&self.property_type)?,
            last_inspection: self.last_inspection,
            insurance_info: self.insurance_info,
            tax_details: self.tax_details.into(),
            created_at: self.created_at,
        })
    }
}

impl PropertyRowWithId {
    fn try_into_property(self) -> Result<Property, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Property {
            id,
            address: self.address,
            owner: self.owner,
            valuation: self.valuation,
            status: self.status,
            square_footage: self.square_footage,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            images: self.images,
            property_type: parse_type(&self.property_type)?,
            last_inspection: self.last_inspection,
            insurance_info: self.insurance_info,
            tax_details: self.tax_details.into(),
            created_at: self.created_at,
        })
    }
}

/// Presence checks for the creation payload. Numeric zero counts as
/// missing.
fn validate_create(input: &CreateProperty) -> DomusResult<PropertyType> {
    require_str("address", &input.address)?;
    require_f64("valuation", input.valuation)?;
    require_str("status", &input.status)?;
    require_f64("square_footage", input.square_footage)?;
    require_u32("bedrooms", input.bedrooms)?;
    require_f64("bathrooms", input.bathrooms)?;
    let property_type = PropertyType::parse(&input.property_type).ok_or_else(|| {
        DomusError::invalid_payload(format!(
            "property_type must be 'residential' or 'commercial', got '{}'",
            input.property_type
        ))
    })?;
    require_f64("tax_details.annual_amount", input.tax_details.annual_amount)?;
    require_str("tax_details.last_paid", &input.tax_details.last_paid)?;
    require_str("tax_details.next_due", &input.tax_details.next_due)?;
    Ok(property_type)
}

/// SurrealDB implementation of the Property repository.
#[derive(Clone)]
pub struct SurrealPropertyRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPropertyRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PropertyRepository for SurrealPropertyRepository<C> {
    async fn create(&self, owner: &str, input: CreateProperty) -> DomusResult<Property> {
        let property_type = validate_create(&input)?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('property', $id) SET \
                 address = $address, owner = $owner, \
                 valuation = $valuation, status = $status, \
                 square_footage = $square_footage, bedrooms = $bedrooms, \
                 bathrooms = $bathrooms, amenities = $amenities, \
                 images = $images, property_type = $property_type, \
                 last_inspection = $last_inspection, \
                 insurance_info = $insurance_info, \
                 tax_details = $tax_details",
            )
            .bind(("id", id_str.clone()))
            .bind(("address", input.address))
            .bind(("owner", owner.to_string()))
            .bind(("valuation", input.valuation))
            .bind(("status", input.status))
            .bind(("square_footage", input.square_footage))
            .bind(("bedrooms", input.bedrooms))
            .bind(("bathrooms", input.bathrooms))
            .bind(("amenities", input.amenities))
            .bind(("images", input.images))
            .bind(("property_type", property_type.as_str().to_string()))
            .bind(("last_inspection", input.last_inspection))
            .bind(("insurance_info", input.insurance_info))
            .bind(("tax_details", TaxDetailsRow::from(input.tax_details)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PropertyRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_property(id)?)
    }

    async fn get_all(&self) -> DomusResult<Vec<Property>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM property")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PropertyRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_property().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<Property> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('property', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PropertyRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_property(id)?)
    }

    async fn get_by_type(&self, property_type: PropertyType) -> DomusResult<Vec<Property>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM property \
                 WHERE property_type = $property_type",
            )
            .bind(("property_type", property_type.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PropertyRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_property().map_err(DomusError::from))
            .collect()
    }

    async fn update(&self, id: Uuid, input: UpdateProperty) -> DomusResult<Property> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.address.is_some() {
            sets.push("address = $address");
        }
        if input.valuation.is_some() {
            sets.push("valuation = $valuation");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.square_footage.is_some() {
            sets.push("square_footage = $square_footage");
        }
        if input.bedrooms.is_some() {
            sets.push("bedrooms = $bedrooms");
        }
        if input.bathrooms.is_some() {
            sets.push("bathrooms = $bathrooms");
        }
        if input.amenities.is_some() {
            sets.push("amenities = $amenities");
        }
        if input.images.is_some() {
            sets.push("images = $images");
        }
        if input.property_type.is_some() {
            sets.push("property_type = $property_type");
        }
        if input.last_inspection.is_some() {
            sets.push("last_inspection = $last_inspection");
        }
        if input.insurance_info.is_some() {
            sets.push("insurance_info = $insurance_info");
        }
        if input.tax_details.is_some() {
            sets.push("tax_details = $tax_details");
        }

        if sets.is_empty() {
            // Nothing to merge; still report NotFound for a missing id.
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE type::record('property', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }
        if let Some(valuation) = input.valuation {
            builder = builder.bind(("valuation", valuation));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status));
        }
        if let Some(square_footage) = input.square_footage {
            builder = builder.bind(("square_footage", square_footage));
        }
        if let Some(bedrooms) = input.bedrooms {
            builder = builder.bind(("bedrooms", bedrooms));
        }
        if let Some(bathrooms) = input.bathrooms {
            builder = builder.bind(("bathrooms", bathrooms));
        }
        if let Some(amenities) = input.amenities {
            builder = builder.bind(("amenities", amenities));
        }
        if let Some(images) = input.images {
            builder = builder.bind(("images", images));
        }
        if let Some(property_type) = input.property_type {
            builder = builder.bind(("property_type", property_type.as_str().to_string()));
        }
        if let Some(last_inspection) = input.last_inspection {
            builder = builder.bind(("last_inspection", last_inspection));
        }
        if let Some(insurance_info) = input.insurance_info {
            builder = builder.bind(("insurance_info", insurance_info));
        }
        if let Some(tax_details) = input.tax_details {
            builder = builder.bind(("tax_details", TaxDetailsRow::from(tax_details)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PropertyRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_property(id)?)
    }

    async fn delete(&self, id: Uuid) -> DomusResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('property', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PropertyRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::not_found(ENTITY, &id_str));
        }

        Ok(())
    }
}
