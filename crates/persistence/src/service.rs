//! The data access facade.
//!
//! [`TenantDataService`] is the single entry point for the business layer. It
//! checks identifier arguments, then hands the call to the tenant or
//! application store and returns the result unchanged.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{IdGenerator, RegistryStorage, StorageGateway};
use crate::error::{PreconditionError, StorageResult};
use crate::store::{ApplicationStore, TenantStore};
use crate::types::{Application, ApplicationId, Tenant, TenantId};

/// Tenant and application operations over a [`StorageGateway`].
///
/// Both collaborators are required at construction, so a service with a
/// missing gateway or identifier generator cannot exist.
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "sqlite")]
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
///
/// use tenant_registry_persistence::backends::sqlite::SqliteBackend;
/// use tenant_registry_persistence::core::{RandomIdGenerator, RegistryStorage};
/// use tenant_registry_persistence::types::Tenant;
/// use tenant_registry_persistence::TenantDataService;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
///
/// let service = TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator));
/// let tenant_id = service.create_tenant(Tenant::new("S1")).await?;
/// assert_eq!(service.read_tenant(tenant_id).await?.secret_key, "S1");
/// # Ok(())
/// # }
/// ```
pub struct TenantDataService<G> {
    gateway: Arc<G>,
    tenants: TenantStore<G>,
    applications: ApplicationStore<G>,
}

impl<G: StorageGateway> TenantDataService<G> {
    /// Creates the service from its required collaborators.
    pub fn new(gateway: Arc<G>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            tenants: TenantStore::new(Arc::clone(&gateway), Arc::clone(&id_generator)),
            applications: ApplicationStore::new(Arc::clone(&gateway), id_generator),
            gateway,
        }
    }

    /// Returns the underlying gateway.
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }
}

fn require_tenant_id(tenant_id: TenantId) -> Result<(), PreconditionError> {
    if tenant_id.is_empty() {
        return Err(PreconditionError::EmptyIdentifier { field: "tenant_id" });
    }
    Ok(())
}

fn require_application_id(application_id: ApplicationId) -> Result<(), PreconditionError> {
    if application_id.is_empty() {
        return Err(PreconditionError::EmptyIdentifier {
            field: "application_id",
        });
    }
    Ok(())
}

#[async_trait]
impl<G: StorageGateway + 'static> RegistryStorage for TenantDataService<G> {
    fn backend_name(&self) -> &'static str {
        self.gateway.name()
    }

    async fn create_tenant(&self, tenant: Tenant) -> StorageResult<TenantId> {
        self.tenants.create(&tenant).await
    }

    async fn read_tenant(&self, tenant_id: TenantId) -> StorageResult<Tenant> {
        require_tenant_id(tenant_id)?;
        self.tenants.read(tenant_id).await
    }

    async fn update_tenant(&self, tenant_id: TenantId, tenant: Tenant) -> StorageResult<()> {
        require_tenant_id(tenant_id)?;
        self.tenants.update(tenant_id, &tenant).await
    }

    async fn delete_tenant(&self, tenant_id: TenantId) -> StorageResult<()> {
        require_tenant_id(tenant_id)?;
        self.tenants.delete(tenant_id).await
    }

    async fn create_application(
        &self,
        tenant_id: TenantId,
        application: Application,
    ) -> StorageResult<ApplicationId> {
        require_tenant_id(tenant_id)?;
        self.applications.create(tenant_id, &application).await
    }

    async fn read_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Application> {
        require_tenant_id(tenant_id)?;
        require_application_id(application_id)?;
        self.applications.read(tenant_id, application_id).await
    }

    async fn read_all_applications(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<HashMap<ApplicationId, Application>> {
        require_tenant_id(tenant_id)?;
        self.applications.read_all(tenant_id).await
    }

    async fn update_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: Application,
    ) -> StorageResult<()> {
        require_tenant_id(tenant_id)?;
        require_application_id(application_id)?;
        self.applications
            .update(tenant_id, application_id, &application)
            .await
    }

    async fn delete_application(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()> {
        require_tenant_id(tenant_id)?;
        require_application_id(application_id)?;
        self.applications.delete(tenant_id, application_id).await
    }
}

impl<G: fmt::Debug> fmt::Debug for TenantDataService<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantDataService")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}
