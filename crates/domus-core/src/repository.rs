//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Each repository owns exactly one
//! entity table; cross-entity existence checks (lease, transaction,
//! maintenance, and document creation all reference other tables) are the
//! implementation's responsibility at write time. Deletions never cascade.

use uuid::Uuid;

use crate::error::DomusResult;
use crate::models::{
    document::{CreateDocument, Document, UpdateDocument},
    financial_transaction::{CreateFinancialTransaction, FinancialTransaction},
    lease_agreement::{CreateLeaseAgreement, LeaseAgreement, UpdateLeaseAgreement},
    maintenance_request::{CreateMaintenanceRequest, MaintenanceRequest, UpdateMaintenanceRequest},
    property::{CreateProperty, Property, PropertyType, UpdateProperty},
    tenant::{CreateTenant, Tenant},
};

pub trait PropertyRepository: Send + Sync {
    /// `owner` is the opaque caller identity, recorded on the new record.
    fn create(
        &self,
        owner: &str,
        input: CreateProperty,
    ) -> impl Future<Output = DomusResult<Property>> + Send;
    /// Returns every stored property in store iteration order; `Empty`
    /// when the table has no rows.
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<Property>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DomusResult<Property>> + Send;
    /// Exact-match filter on property type; `Empty` when nothing matches.
    fn get_by_type(
        &self,
        property_type: PropertyType,
    ) -> impl Future<Output = DomusResult<Vec<Property>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateProperty,
    ) -> impl Future<Output = DomusResult<Property>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DomusResult<()>> + Send;
}

pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = DomusResult<Tenant>> + Send;
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<Tenant>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DomusResult<Tenant>> + Send;
}

pub trait LeaseAgreementRepository: Send + Sync {
    /// Validation order: payload presence, then tenant existence, then
    /// property existence, then date ordering.
    fn create(
        &self,
        input: CreateLeaseAgreement,
    ) -> impl Future<Output = DomusResult<LeaseAgreement>> + Send;
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<LeaseAgreement>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DomusResult<LeaseAgreement>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateLeaseAgreement,
    ) -> impl Future<Output = DomusResult<LeaseAgreement>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DomusResult<()>> + Send;
    /// Appends one payment when the lease is not completed and `amount`
    /// equals the lease rent exactly. Never changes `renewal_status`.
    fn record_rent_payment(
        &self,
        id: Uuid,
        amount: f64,
    ) -> impl Future<Output = DomusResult<LeaseAgreement>> + Send;
}

pub trait FinancialTransactionRepository: Send + Sync {
    /// `recorded_by` is the opaque caller identity, stamped on the record
    /// together with the creation date.
    fn create(
        &self,
        recorded_by: &str,
        input: CreateFinancialTransaction,
    ) -> impl Future<Output = DomusResult<FinancialTransaction>> + Send;
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<FinancialTransaction>>> + Send;
    fn get_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = DomusResult<FinancialTransaction>> + Send;
    /// Exact-match filter on the referenced property; `Empty` when nothing
    /// matches. The property itself need not still exist.
    fn get_by_property(
        &self,
        property_id: Uuid,
    ) -> impl Future<Output = DomusResult<Vec<FinancialTransaction>>> + Send;
}

pub trait MaintenanceRequestRepository: Send + Sync {
    fn create(
        &self,
        input: CreateMaintenanceRequest,
    ) -> impl Future<Output = DomusResult<MaintenanceRequest>> + Send;
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<MaintenanceRequest>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DomusResult<MaintenanceRequest>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateMaintenanceRequest,
    ) -> impl Future<Output = DomusResult<MaintenanceRequest>> + Send;
}

pub trait DocumentRepository: Send + Sync {
    fn create(&self, input: CreateDocument) -> impl Future<Output = DomusResult<Document>> + Send;
    fn get_all(&self) -> impl Future<Output = DomusResult<Vec<Document>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DomusResult<Document>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateDocument,
    ) -> impl Future<Output = DomusResult<Document>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DomusResult<()>> + Send;
}
