//! Cassandra schema definitions.

use super::backend::{CurrentSession, driver_error};
use crate::error::BackendError;

fn create_keyspace(keyspace: &str, replication_factor: u32) -> String {
    format!(
        "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
         {{ 'class' : 'SimpleStrategy', 'replication_factor' : {replication_factor} }}"
    )
}

fn create_tenant_table(keyspace: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {keyspace}.tenant (\
         tenant_id uuid PRIMARY KEY, \
         secret_key text)"
    )
}

fn create_application_table(keyspace: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {keyspace}.application (\
         tenant_id uuid, \
         application_id uuid, \
         name text, \
         PRIMARY KEY (tenant_id, application_id))"
    )
}

/// Creates the keyspace and registry tables if they do not exist.
pub(crate) async fn initialize_schema(
    session: &CurrentSession,
    keyspace: &str,
    replication_factor: u32,
) -> Result<(), BackendError> {
    for (what, ddl) in [
        ("keyspace", create_keyspace(keyspace, replication_factor)),
        ("tenant table", create_tenant_table(keyspace)),
        ("application table", create_application_table(keyspace)),
    ] {
        session.query(ddl).await.map_err(|e| BackendError::SchemaError {
            message: format!("Failed to create {}: {}", what, driver_error(e)),
        })?;
    }

    tracing::info!(keyspace = %keyspace, "Cassandra registry schema ready");
    Ok(())
}
