//! RegistrySession implementation for SQLite.

use async_trait::async_trait;
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

use crate::core::RegistrySession;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{Application, ApplicationId, Tenant, TenantId};

/// A pooled SQLite connection scoped to one registry operation.
///
/// The connection goes back to the pool when the session is dropped.
pub struct SqliteSession {
    conn: PooledConnection<SqliteConnectionManager>,
}

impl SqliteSession {
    pub(crate) fn new(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self { conn }
    }
}

impl std::fmt::Debug for SqliteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSession").finish()
    }
}

fn parse_application_id(raw: &str) -> StorageResult<ApplicationId> {
    raw.parse().map_err(|e| {
        StorageError::Backend(BackendError::SerializationError {
            message: format!("invalid application_id '{}': {}", raw, e),
        })
    })
}

#[async_trait]
impl RegistrySession for SqliteSession {
    async fn select_tenant(&mut self, tenant_id: TenantId) -> StorageResult<Option<Tenant>> {
        let secret_key: Option<String> = self
            .conn
            .query_row(
                "SELECT secret_key FROM tenant WHERE tenant_id = ?1",
                params![tenant_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(secret_key.map(|secret_key| Tenant { secret_key }))
    }

    async fn upsert_tenant(&mut self, tenant_id: TenantId, tenant: &Tenant) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO tenant (tenant_id, secret_key) VALUES (?1, ?2)
             ON CONFLICT (tenant_id) DO UPDATE SET secret_key = excluded.secret_key",
            params![tenant_id.to_string(), tenant.secret_key],
        )?;
        Ok(())
    }

    async fn delete_tenant(&mut self, tenant_id: TenantId) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM tenant WHERE tenant_id = ?1",
            params![tenant_id.to_string()],
        )?;
        Ok(())
    }

    async fn select_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Option<Application>> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM application WHERE tenant_id = ?1 AND application_id = ?2",
                params![tenant_id.to_string(), application_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(name.map(|name| Application { name }))
    }

    async fn select_applications(
        &mut self,
        tenant_id: TenantId,
    ) -> StorageResult<Vec<(ApplicationId, Application)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT application_id, name FROM application WHERE tenant_id = ?1")?;
        let rows = stmt.query_map(params![tenant_id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut applications = Vec::new();
        for row in rows {
            let (raw_id, name) = row?;
            applications.push((parse_application_id(&raw_id)?, Application { name }));
        }
        Ok(applications)
    }

    async fn upsert_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: &Application,
    ) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO application (tenant_id, application_id, name) VALUES (?1, ?2, ?3)
             ON CONFLICT (tenant_id, application_id) DO UPDATE SET name = excluded.name",
            params![
                tenant_id.to_string(),
                application_id.to_string(),
                application.name
            ],
        )?;
        Ok(())
    }

    async fn delete_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM application WHERE tenant_id = ?1 AND application_id = ?2",
            params![tenant_id.to_string(), application_id.to_string()],
        )?;
        Ok(())
    }
}
