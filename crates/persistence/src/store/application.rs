//! Application CRUD, scoped to an owning tenant.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::{IdGenerator, RegistrySession, StorageGateway};
use crate::error::StorageResult;
use crate::types::{Application, ApplicationId, TenantId};

use super::existence::{require_application, require_tenant};

/// Reads and writes rows of the `application` table.
///
/// Each operation first confirms the owning tenant exists, on the same
/// session it then uses for the read or write.
pub struct ApplicationStore<G> {
    gateway: Arc<G>,
    id_generator: Arc<dyn IdGenerator>,
}

impl<G: StorageGateway> ApplicationStore<G> {
    /// Creates a store over the given gateway and identifier source.
    pub fn new(gateway: Arc<G>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            gateway,
            id_generator,
        }
    }

    /// Writes a new application under an existing tenant.
    ///
    /// The tenant check runs before identifier generation, and a generator
    /// failure is returned before any write.
    pub async fn create(
        &self,
        tenant_id: TenantId,
        application: &Application,
    ) -> StorageResult<ApplicationId> {
        let mut session = self.gateway.open_session().await?;
        require_tenant(&mut session, tenant_id).await?;

        let application_id = ApplicationId::from(self.id_generator.generate_id()?);
        session
            .upsert_application(tenant_id, application_id, application)
            .await?;

        debug!(
            %tenant_id,
            %application_id,
            backend = self.gateway.name(),
            "created application"
        );
        Ok(application_id)
    }

    /// Reads one application.
    pub async fn read(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Application> {
        let mut session = self.gateway.open_session().await?;
        require_application(&mut session, tenant_id, application_id).await
    }

    /// Reads every application in the tenant's partition.
    pub async fn read_all(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<HashMap<ApplicationId, Application>> {
        let mut session = self.gateway.open_session().await?;
        require_tenant(&mut session, tenant_id).await?;

        let rows = session.select_applications(tenant_id).await?;
        debug!(%tenant_id, count = rows.len(), "scanned applications");

        Ok(rows.into_iter().collect())
    }

    /// Overwrites an existing application.
    pub async fn update(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: &Application,
    ) -> StorageResult<()> {
        let mut session = self.gateway.open_session().await?;
        require_application(&mut session, tenant_id, application_id).await?;
        session
            .upsert_application(tenant_id, application_id, application)
            .await?;

        debug!(%tenant_id, %application_id, "updated application");
        Ok(())
    }

    /// Deletes an existing application.
    pub async fn delete(
        &self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()> {
        let mut session = self.gateway.open_session().await?;
        require_application(&mut session, tenant_id, application_id).await?;
        session.delete_application(tenant_id, application_id).await?;

        debug!(%tenant_id, %application_id, "deleted application");
        Ok(())
    }
}

impl<G: fmt::Debug> fmt::Debug for ApplicationStore<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationStore")
            .field("gateway", &self.gateway)
            .field("id_generator", &self.id_generator)
            .finish()
    }
}
