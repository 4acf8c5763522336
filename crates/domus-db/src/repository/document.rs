//! SurrealDB implementation of [`DocumentRepository`].
//!
//! The creation payload's metadata (title, tags) is validated and then
//! dropped: only property reference, document type, and content persist.

use domus_core::error::{DomusError, DomusResult};
use domus_core::models::document::{CreateDocument, Document, UpdateDocument};
use domus_core::repository::DocumentRepository;
use domus_core::validate::require_str;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::record_exists;

const ENTITY: &str = "document";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct DocumentRow {
    property_id: String,
    document_type: String,
    content: String,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct DocumentRowWithId {
    record_id: String,
    property_id: String,
    document_type: String,
    content: String,
}

impl DocumentRow {
    fn into_document(self, id: Uuid) -> Result<Document, DbError> {
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(Document {
            id,
            property_id,
            document_type: self.document_type,
            content: self.content,
        })
    }
}

impl DocumentRowWithId {
    fn try_into_document(self) -> Result<Document, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let property_id = Uuid::parse_str(&self.property_id)
            .map_err(|e| DbError::Decode(format!("invalid property UUID: {e}")))?;
        Ok(Document {
            id,
            property_id,
            document_type: self.document_type,
            content: self.content,
        })
    }
}

/// Presence checks. Metadata title is required even though the metadata
/// itself is not persisted.
fn validate_create(input: &CreateDocument) -> DomusResult<()> {
    require_str("document_type", &input.document_type)?;
    require_str("content", &input.content)?;
    require_str("metadata.title", &input.metadata.title)?;
    Ok(())
}

/// SurrealDB implementation of the Document repository.
#[derive(Clone)]
pub struct SurrealDocumentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDocumentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DocumentRepository for SurrealDocumentRepository<C> {
    async fn create(&self, input: CreateDocument) -> DomusResult<Document> {
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
                "CREATE type::record('document', $id) SET \
                 property_id = $property_id, \
                 document_type = $document_type, content = $content",
            )
            .bind(("id", id_str.clone()))
            .bind(("property_id", property_id))
            .bind(("document_type", input.document_type))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_document(id)?)
    }

    async fn get_all(&self) -> DomusResult<Vec<Document>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM document")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::empty(ENTITY));
        }

        rows.into_iter()
            .map(|row| row.try_into_document().map_err(DomusError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> DomusResult<Document> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('document', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_document(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateDocument) -> DomusResult<Document> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.document_type.is_some() {
            sets.push("document_type = $document_type");
        }
        if input.content.is_some() {
            sets.push("content = $content");
        }

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE type::record('document', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(document_type) = input.document_type {
            builder = builder.bind(("document_type", document_type));
        }
        if let Some(content) = input.content {
            builder = builder.bind(("content", content));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomusError::not_found(ENTITY, &id_str))?;

        Ok(row.into_document(id)?)
    }

    async fn delete(&self, id: Uuid) -> DomusResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('document', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DomusError::not_found(ENTITY, &id_str));
        }

        Ok(())
    }
}
