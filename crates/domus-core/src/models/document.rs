//! Document domain model.
//!
//! The creation payload carries metadata (title, tags) that is validated
//! and then discarded: only the property reference, document type, and
//! content are persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub property_id: Uuid,
    pub document_type: String,
    pub content: String,
}

/// Caller-supplied metadata, accepted for validation only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentMetadata {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    pub property_id: Uuid,
    pub document_type: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDocument {
    pub document_type: Option<String>,
    pub content: Option<String>,
}
