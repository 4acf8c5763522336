//! Property domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allowed property classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl PropertyType {
    /// Parse the wire form (`residential` / `commercial`). Anything else
    /// is rejected at payload validation time.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
        }
    }
}

/// Annual property tax information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxDetails {
    pub annual_amount: f64,
    pub last_paid: String,
    pub next_due: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub address: String,
    /// Caller identity recorded at creation; never consulted afterwards.
    pub owner: String,
    pub valuation: f64,
    pub status: String,
    pub square_footage: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub property_type: PropertyType,
    pub last_inspection: String,
    pub insurance_info: String,
    pub tax_details: TaxDetails,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProperty {
    pub address: String,
    pub valuation: f64,
    pub status: String,
    pub square_footage: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Wire form; validated against [`PropertyType`] at creation so a bad
    /// value yields `InvalidPayload` rather than a deserialization error.
    pub property_type: String,
    #[serde(default)]
    pub last_inspection: String,
    #[serde(default)]
    pub insurance_info: String,
    pub tax_details: TaxDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProperty {
    pub address: Option<String>,
    pub valuation: Option<f64>,
    pub status: Option<String>,
    pub square_footage: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub property_type: Option<PropertyType>,
    pub last_inspection: Option<String>,
    pub insurance_info: Option<String>,
    /// Replaces the whole sub-record when present; no deep merge.
    pub tax_details: Option<TaxDetails>,
}
