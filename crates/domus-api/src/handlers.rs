//! Request handlers, one per exposed operation.
//!
//! [`Handlers`] owns one repository per entity table, all sharing a
//! cloned connection handle. The host dispatches calls one at a time;
//! each handler is a self-contained sequence of repository calls ending
//! in an [`ApiResponse`].

use domus_core::models::document::{CreateDocument, Document, UpdateDocument};
use domus_core::models::financial_transaction::{
    CreateFinancialTransaction, FinancialTransaction,
};
use domus_core::models::lease_agreement::{
    CreateLeaseAgreement, LeaseAgreement, UpdateLeaseAgreement,
};
use domus_core::models::maintenance_request::{
    CreateMaintenanceRequest, MaintenanceRequest, UpdateMaintenanceRequest,
};
use domus_core::models::property::{CreateProperty, Property, PropertyType, UpdateProperty};
use domus_core::models::tenant::{CreateTenant, Tenant};
use domus_core::repository::{
    DocumentRepository, FinancialTransactionRepository, LeaseAgreementRepository,
    MaintenanceRequestRepository, PropertyRepository, TenantRepository,
};
use domus_core::DomusError;
use domus_db::repository::{
    SurrealDocumentRepository, SurrealFinancialTransactionRepository,
    SurrealLeaseAgreementRepository, SurrealMaintenanceRequestRepository,
    SurrealPropertyRepository, SurrealTenantRepository,
};
use surrealdb::{Connection, Surreal};
use tracing::debug;
use uuid::Uuid;

use crate::response::ApiResponse;

/// All request handlers, wired over a single database connection.
#[derive(Clone)]
pub struct Handlers<C: Connection> {
    properties: SurrealPropertyRepository<C>,
    tenants: SurrealTenantRepository<C>,
    leases: SurrealLeaseAgreementRepository<C>,
    transactions: SurrealFinancialTransactionRepository<C>,
    maintenance: SurrealMaintenanceRequestRepository<C>,
    documents: SurrealDocumentRepository<C>,
}

impl<C: Connection> Handlers<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            properties: SurrealPropertyRepository::new(db.clone()),
            tenants: SurrealTenantRepository::new(db.clone()),
            leases: SurrealLeaseAgreementRepository::new(db.clone()),
            transactions: SurrealFinancialTransactionRepository::new(db.clone()),
            maintenance: SurrealMaintenanceRequestRepository::new(db.clone()),
            documents: SurrealDocumentRepository::new(db),
        }
    }

    // -------------------------------------------------------------------
    // Property
    // -------------------------------------------------------------------

    pub async fn create_property(
        &self,
        caller: &str,
        payload: CreateProperty,
    ) -> ApiResponse<Property> {
        debug!(caller, "create_property");
        self.properties.create(caller, payload).await.into()
    }

    pub async fn get_all_properties(&self) -> ApiResponse<Vec<Property>> {
        self.properties.get_all().await.into()
    }

    pub async fn get_property_by_id(&self, id: Uuid) -> ApiResponse<Property> {
        self.properties.get_by_id(id).await.into()
    }

    /// Filters by the exact wire form of the type. An unknown type can
    /// never match anything, so it reports the same empty-filter outcome.
    pub async fn get_properties_by_type(&self, property_type: &str) -> ApiResponse<Vec<Property>> {
        match PropertyType::parse(property_type) {
            Some(t) => self.properties.get_by_type(t).await.into(),
            None => ApiResponse::from_result(Err(DomusError::empty("property"))),
        }
    }

    pub async fn update_property(
        &self,
        id: Uuid,
        payload: UpdateProperty,
    ) -> ApiResponse<Property> {
        debug!(%id, "update_property");
        self.properties.update(id, payload).await.into()
    }

    pub async fn delete_property(&self, id: Uuid) -> ApiResponse<()> {
        debug!(%id, "delete_property");
        self.properties.delete(id).await.into()
    }

    // -------------------------------------------------------------------
    // Tenant
    // -------------------------------------------------------------------

    pub async fn create_tenant(&self, payload: CreateTenant) -> ApiResponse<Tenant> {
        debug!("create_tenant");
        self.tenants.create(payload).await.into()
    }

    pub async fn get_all_tenants(&self) -> ApiResponse<Vec<Tenant>> {
        self.tenants.get_all().await.into()
    }

    pub async fn get_tenant_by_id(&self, id: Uuid) -> ApiResponse<Tenant> {
        self.tenants.get_by_id(id).await.into()
    }

    // -------------------------------------------------------------------
    // Lease agreement
    // -------------------------------------------------------------------

    pub async fn create_lease_agreement(
        &self,
        payload: CreateLeaseAgreement,
    ) -> ApiResponse<LeaseAgreement> {
        debug!("create_lease_agreement");
        self.leases.create(payload).await.into()
    }

    pub async fn get_all_lease_agreements(&self) -> ApiResponse<Vec<LeaseAgreement>> {
        self.leases.get_all().await.into()
    }

    pub async fn get_lease_agreement_by_id(&self, id: Uuid) -> ApiResponse<LeaseAgreement> {
        self.leases.get_by_id(id).await.into()
    }

    pub async fn update_lease_agreement(
        &self,
        id: Uuid,
        payload: UpdateLeaseAgreement,
    ) -> ApiResponse<LeaseAgreement> {
        debug!(%id, "update_lease_agreement");
        self.leases.update(id, payload).await.into()
    }

    pub async fn delete_lease_agreement(&self, id: Uuid) -> ApiResponse<()> {
        debug!(%id, "delete_lease_agreement");
        self.leases.delete(id).await.into()
    }

    pub async fn record_rent_payment(&self, id: Uuid, amount: f64) -> ApiResponse<LeaseAgreement> {
        debug!(%id, amount, "record_rent_payment");
        self.leases.record_rent_payment(id, amount).await.into()
    }

    // -------------------------------------------------------------------
    // Financial transaction
    // -------------------------------------------------------------------

    pub async fn create_financial_transaction(
        &self,
        caller: &str,
        payload: CreateFinancialTransaction,
    ) -> ApiResponse<FinancialTransaction> {
        debug!(caller, "create_financial_transaction");
        self.transactions.create(caller, payload).await.into()
    }

    pub async fn get_all_financial_transactions(&self) -> ApiResponse<Vec<FinancialTransaction>> {
        self.transactions.get_all().await.into()
    }

    pub async fn get_financial_transaction_by_id(
        &self,
        id: Uuid,
    ) -> ApiResponse<FinancialTransaction> {
        self.transactions.get_by_id(id).await.into()
    }

    pub async fn get_transactions_by_property_id(
        &self,
        property_id: Uuid,
    ) -> ApiResponse<Vec<FinancialTransaction>> {
        self.transactions.get_by_property(property_id).await.into()
    }

    // -------------------------------------------------------------------
    // Maintenance request
    // -------------------------------------------------------------------

    pub async fn create_maintenance_request(
        &self,
        payload: CreateMaintenanceRequest,
    ) -> ApiResponse<MaintenanceRequest> {
        debug!("create_maintenance_request");
        self.maintenance.create(payload).await.into()
    }

    pub async fn get_all_maintenance_requests(&self) -> ApiResponse<Vec<MaintenanceRequest>> {
        self.maintenance.get_all().await.into()
    }

    pub async fn get_maintenance_request_by_id(&self, id: Uuid) -> ApiResponse<MaintenanceRequest> {
        self.maintenance.get_by_id(id).await.into()
    }

    pub async fn update_maintenance_request(
        &self,
        id: Uuid,
        payload: UpdateMaintenanceRequest,
    ) -> ApiResponse<MaintenanceRequest> {
        debug!(%id, "update_maintenance_request");
        self.maintenance.update(id, payload).await.into()
    }

    // -------------------------------------------------------------------
    // Document
    // -------------------------------------------------------------------

    pub async fn create_document(&self, payload: CreateDocument) -> ApiResponse<Document> {
        debug!("create_document");
        self.documents.create(payload).await.into()
    }

    pub async fn get_all_documents(&self) -> ApiResponse<Vec<Document>> {
        self.documents.get_all().await.into()
    }

    pub async fn get_document_by_id(&self, id: Uuid) -> ApiResponse<Document> {
        self.documents.get_by_id(id).await.into()
    }

    pub async fn update_document(
        &self,
        id: Uuid,
        payload: UpdateDocument,
    ) -> ApiResponse<Document> {
        debug!(%id, "update_document");
        self.documents.update(id, payload).await.into()
    }

    pub async fn delete_document(&self, id: Uuid) -> ApiResponse<()> {
        debug!(%id, "delete_document");
        self.documents.delete(id).await.into()
    }
}
