//! Per-operation storage session.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Application, ApplicationId, Tenant, TenantId};

/// A scoped handle onto the registry tables.
///
/// Sessions expose exactly the primitives a partitioned wide-column store
/// offers: point lookups, a range scan over one partition, single-row upserts
/// and single-row deletes. Nothing spans rows atomically.
///
/// Reads return `Ok(None)` (or an empty vector) when no row matches. Errors
/// are reserved for infrastructure failures.
#[async_trait]
pub trait RegistrySession: Send {
    /// Point lookup in `tenant` by `tenant_id`.
    async fn select_tenant(&mut self, tenant_id: TenantId) -> StorageResult<Option<Tenant>>;

    /// Writes the tenant row, replacing any existing one.
    async fn upsert_tenant(&mut self, tenant_id: TenantId, tenant: &Tenant) -> StorageResult<()>;

    /// Removes the tenant row. Removing a missing row is not an error.
    async fn delete_tenant(&mut self, tenant_id: TenantId) -> StorageResult<()>;

    /// Point lookup in `application` by `(tenant_id, application_id)`.
    async fn select_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Option<Application>>;

    /// Range scan of every application row in the tenant's partition.
    async fn select_applications(
        &mut self,
        tenant_id: TenantId,
    ) -> StorageResult<Vec<(ApplicationId, Application)>>;

    /// Writes the application row, replacing any existing one.
    async fn upsert_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: &Application,
    ) -> StorageResult<()>;

    /// Removes the application row. Removing a missing row is not an error.
    async fn delete_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()>;
}
