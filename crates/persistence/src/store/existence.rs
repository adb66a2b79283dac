//! Existence checks standing in for a foreign key.
//!
//! The backing store has no constraint tying `application.tenant_id` to a
//! `tenant` row and no transaction spanning both tables. Writes that depend on
//! a row are guarded by a separate existence check instead, run on the same
//! session just before the write.
//!
//! Between the check and the write another caller may remove the checked row.
//! The dependent write still lands, so a concurrent `delete_tenant` can leave
//! behind an application whose tenant is gone. This window is accepted; closing
//! it requires conditional writes from the backend.
//!
//! Checks run in a fixed order: the tenant first, then the application. The
//! first failing check decides the error.

use tracing::debug;

use crate::core::RegistrySession;
use crate::error::{ResourceError, StorageResult};
use crate::types::{Application, ApplicationId, Tenant, TenantId};

/// Returns the tenant row, or `TenantNotFound`.
pub(crate) async fn require_tenant<S>(session: &mut S, tenant_id: TenantId) -> StorageResult<Tenant>
where
    S: RegistrySession + ?Sized,
{
    match session.select_tenant(tenant_id).await? {
        Some(tenant) => Ok(tenant),
        None => {
            debug!(%tenant_id, "tenant lookup found no row");
            Err(ResourceError::TenantNotFound { tenant_id }.into())
        }
    }
}

/// Returns the application row after checking its tenant.
///
/// Fails with `TenantNotFound` when the tenant is missing, whether or not the
/// application row exists, and with `ApplicationNotFound` otherwise.
pub(crate) async fn require_application<S>(
    session: &mut S,
    tenant_id: TenantId,
    application_id: ApplicationId,
) -> StorageResult<Application>
where
    S: RegistrySession + ?Sized,
{
    require_tenant(session, tenant_id).await?;

    match session.select_application(tenant_id, application_id).await? {
        Some(application) => Ok(application),
        None => {
            debug!(%tenant_id, %application_id, "application lookup found no row");
            Err(ResourceError::ApplicationNotFound {
                tenant_id,
                application_id,
            }
            .into())
        }
    }
}
