//! RegistrySession implementation for Cassandra.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cdrs_tokio::consistency::Consistency;
use cdrs_tokio::frame::{Envelope, TryFromRow};
use cdrs_tokio::query::QueryValues;
use cdrs_tokio::query_values;
use cdrs_tokio::statement::StatementParamsBuilder;
use cdrs_tokio_helpers_derive::TryFromRow;
use uuid::Uuid;

use crate::core::RegistrySession;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{Application, ApplicationId, Tenant, TenantId};

use super::backend::CurrentSession;

/// Keyspace-qualified CQL statements.
#[derive(Debug)]
pub(crate) struct Statements {
    select_tenant: String,
    upsert_tenant: String,
    delete_tenant: String,
    select_application: String,
    select_applications: String,
    upsert_application: String,
    delete_application: String,
}

impl Statements {
    pub(crate) fn new(keyspace: &str) -> Self {
        Self {
            select_tenant: format!("SELECT secret_key FROM {keyspace}.tenant WHERE tenant_id = ?"),
            upsert_tenant: format!(
                "INSERT INTO {keyspace}.tenant (tenant_id, secret_key) VALUES (?, ?)"
            ),
            delete_tenant: format!("DELETE FROM {keyspace}.tenant WHERE tenant_id = ?"),
            select_application: format!(
                "SELECT application_id, name FROM {keyspace}.application WHERE tenant_id = ? AND application_id = ?"
            ),
            select_applications: format!(
                "SELECT application_id, name FROM {keyspace}.application WHERE tenant_id = ?"
            ),
            upsert_application: format!(
                "INSERT INTO {keyspace}.application (tenant_id, application_id, name) VALUES (?, ?, ?)"
            ),
            delete_application: format!(
                "DELETE FROM {keyspace}.application WHERE tenant_id = ? AND application_id = ?"
            ),
        }
    }
}

#[derive(Debug, Clone, TryFromRow)]
struct TenantRow {
    secret_key: String,
}

#[derive(Debug, Clone, TryFromRow)]
struct ApplicationRow {
    application_id: Uuid,
    name: String,
}

/// A handle onto the shared driver session, scoped to one registry operation.
pub struct CassandraSession {
    session: Arc<CurrentSession>,
    statements: Arc<Statements>,
    consistency: Consistency,
    request_timeout: Duration,
}

impl std::fmt::Debug for CassandraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CassandraSession")
            .field("consistency", &self.consistency)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl CassandraSession {
    pub(crate) fn new(
        session: Arc<CurrentSession>,
        statements: Arc<Statements>,
        consistency: Consistency,
        request_timeout: Duration,
    ) -> Self {
        Self {
            session,
            statements,
            consistency,
            request_timeout,
        }
    }

    /// Runs one statement under the configured consistency and timeout.
    async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        values: QueryValues,
    ) -> StorageResult<Envelope> {
        let params = StatementParamsBuilder::new()
            .with_values(values)
            .with_consistency(self.consistency)
            .build();

        match tokio::time::timeout(
            self.request_timeout,
            self.session.query_with_params(query, params),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => Err(StorageError::Backend(BackendError::Timeout {
                backend_name: "cassandra".to_string(),
                operation: operation.to_string(),
                timeout_ms: self.request_timeout.as_millis() as u64,
            })),
        }
    }

    async fn rows<R: TryFromRow>(
        &self,
        operation: &'static str,
        query: &str,
        values: QueryValues,
    ) -> StorageResult<Vec<R>> {
        let envelope = self.execute(operation, query, values).await?;
        let rows = envelope.response_body()?.into_rows().unwrap_or_default();
        rows.into_iter()
            .map(|row| {
                R::try_from_row(row).map_err(|e| {
                    StorageError::Backend(BackendError::SerializationError {
                        message: format!("{} returned an undecodable row: {}", operation, e),
                    })
                })
            })
            .collect()
    }
}

#[async_trait]
impl RegistrySession for CassandraSession {
    async fn select_tenant(&mut self, tenant_id: TenantId) -> StorageResult<Option<Tenant>> {
        let rows: Vec<TenantRow> = self
            .rows(
                "select tenant",
                &self.statements.select_tenant,
                query_values!(tenant_id.as_uuid()),
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| Tenant {
            secret_key: row.secret_key,
        }))
    }

    async fn upsert_tenant(&mut self, tenant_id: TenantId, tenant: &Tenant) -> StorageResult<()> {
        self.execute(
            "upsert tenant",
            &self.statements.upsert_tenant,
            query_values!(tenant_id.as_uuid(), tenant.secret_key.clone()),
        )
        .await?;
        Ok(())
    }

    async fn delete_tenant(&mut self, tenant_id: TenantId) -> StorageResult<()> {
        self.execute(
            "delete tenant",
            &self.statements.delete_tenant,
            query_values!(tenant_id.as_uuid()),
        )
        .await?;
        Ok(())
    }

    async fn select_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Option<Application>> {
        let rows: Vec<ApplicationRow> = self
            .rows(
                "select application",
                &self.statements.select_application,
                query_values!(tenant_id.as_uuid(), application_id.as_uuid()),
            )
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .map(|row| Application { name: row.name }))
    }

    async fn select_applications(
        &mut self,
        tenant_id: TenantId,
    ) -> StorageResult<Vec<(ApplicationId, Application)>> {
        let rows: Vec<ApplicationRow> = self
            .rows(
                "select applications",
                &self.statements.select_applications,
                query_values!(tenant_id.as_uuid()),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    ApplicationId::new(row.application_id),
                    Application { name: row.name },
                )
            })
            .collect())
    }

    async fn upsert_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: &Application,
    ) -> StorageResult<()> {
        self.execute(
            "upsert application",
            &self.statements.upsert_application,
            query_values!(
                tenant_id.as_uuid(),
                application_id.as_uuid(),
                application.name.clone()
            ),
        )
        .await?;
        Ok(())
    }

    async fn delete_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()> {
        self.execute(
            "delete application",
            &self.statements.delete_application,
            query_values!(tenant_id.as_uuid(), application_id.as_uuid()),
        )
        .await?;
        Ok(())
    }
}
