//! Tenant CRUD.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::{IdGenerator, RegistrySession, StorageGateway};
use crate::error::StorageResult;
use crate::types::{Tenant, TenantId};

use super::existence::require_tenant;

/// Reads and writes rows of the `tenant` table.
///
/// Every operation opens its own session and releases it before returning.
pub struct TenantStore<G> {
    gateway: Arc<G>,
    id_generator: Arc<dyn IdGenerator>,
}

impl<G: StorageGateway> TenantStore<G> {
    /// Creates a store over the given gateway and identifier source.
    pub fn new(gateway: Arc<G>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            gateway,
            id_generator,
        }
    }

    /// Writes a new tenant under a freshly generated identifier.
    ///
    /// A generator failure is returned before any session is opened.
    pub async fn create(&self, tenant: &Tenant) -> StorageResult<TenantId> {
        let tenant_id = TenantId::from(self.id_generator.generate_id()?);

        let mut session = self.gateway.open_session().await?;
        session.upsert_tenant(tenant_id, tenant).await?;

        debug!(%tenant_id, backend = self.gateway.name(), "created tenant");
        Ok(tenant_id)
    }

    /// Reads the tenant.
    pub async fn read(&self, tenant_id: TenantId) -> StorageResult<Tenant> {
        let mut session = self.gateway.open_session().await?;
        require_tenant(&mut session, tenant_id).await
    }

    /// Overwrites the tenant if it exists.
    pub async fn update(&self, tenant_id: TenantId, tenant: &Tenant) -> StorageResult<()> {
        let mut session = self.gateway.open_session().await?;
        require_tenant(&mut session, tenant_id).await?;
        session.upsert_tenant(tenant_id, tenant).await?;

        debug!(%tenant_id, backend = self.gateway.name(), "updated tenant");
        Ok(())
    }

    /// Deletes the tenant if it exists.
    ///
    /// Applications owned by the tenant are not touched.
    pub async fn delete(&self, tenant_id: TenantId) -> StorageResult<()> {
        let mut session = self.gateway.open_session().await?;
        require_tenant(&mut session, tenant_id).await?;
        session.delete_tenant(tenant_id).await?;

        debug!(%tenant_id, backend = self.gateway.name(), "deleted tenant");
        Ok(())
    }
}

impl<G: fmt::Debug> fmt::Debug for TenantStore<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantStore")
            .field("gateway", &self.gateway)
            .field("id_generator", &self.id_generator)
            .finish()
    }
}
