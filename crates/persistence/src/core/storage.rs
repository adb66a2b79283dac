//! Core registry storage trait.
//!
//! This module defines the [`RegistryStorage`] trait, the operations the
//! business layer calls to manage tenants and their applications.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Application, ApplicationId, Tenant, TenantId};

/// Storage trait for tenants and applications.
///
/// # Referential integrity
///
/// An application may only be written while its owning tenant exists. The
/// check happens at write time; deleting a tenant does not remove its
/// applications.
///
/// # Errors
///
/// * `StorageError::Precondition` - An identifier argument was empty
/// * `StorageError::Resource(TenantNotFound)` - The tenant does not exist
/// * `StorageError::Resource(ApplicationNotFound)` - The application does not exist
/// * `StorageError::IdGeneration` - A new identifier could not be generated
/// * `StorageError::Backend` - The store could not be reached or failed the request
///
/// # Example
///
/// ```ignore
/// use tenant_registry_persistence::core::RegistryStorage;
/// use tenant_registry_persistence::types::{Application, Tenant};
///
/// async fn example<S: RegistryStorage>(storage: &S) -> StorageResult<()> {
///     let tenant_id = storage.create_tenant(Tenant::new("S1")).await?;
///     let application_id = storage
///         .create_application(tenant_id, Application::new("A1"))
///         .await?;
///
///     let application = storage.read_application(tenant_id, application_id).await?;
///     assert_eq!(application.name, "A1");
///
///     storage.delete_application(tenant_id, application_id).await?;
///     storage.delete_tenant(tenant_id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RegistryStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a new tenant and returns its generated identifier.
    async fn create_tenant(&self, tenant: Tenant) -> StorageResult<TenantId>;

    /// Reads an existing tenant.
    async fn read_tenant(&self, tenant_id: TenantId) -> StorageResult<Tenant>;

    /// Replaces the secret key of an existing tenant.
    async fn update_tenant(&self, tenant_id: TenantId, tenant: Tenant) -> StorageResult<()>;

    /// Deletes an existing tenant. Its applications are left in place.
    async fn delete_tenant(&self, tenant_id: TenantId) -> StorageResult<()>;

    /// Creates an application under an existing tenant and returns its identifier.
    async fn create_application(
        &self,
        tenant_id: TenantId,
        application: Application,
    ) -> StorageResult<ApplicationId>;

    /// Reads an existing application.
    async fn read_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Application>;

    /// Reads every application of an existing tenant.
    ///
    /// The map is empty when the tenant has no applications. Iteration order
    /// carries no meaning.
    async fn read_all_applications(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<HashMap<ApplicationId, Application>>;

    /// Replaces the name of an existing application.
    async fn update_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: Application,
    ) -> StorageResult<()>;

    /// Deletes an existing application.
    async fn delete_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()>;
}
