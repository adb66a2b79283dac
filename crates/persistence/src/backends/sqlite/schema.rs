//! SQLite schema definitions.
//!
//! The tables mirror the wide-column layout: no foreign key links
//! `application.tenant_id` to `tenant`, so orphaned application rows are
//! representable exactly as they are in Cassandra.

use rusqlite::Connection;

use crate::error::BackendError;

const CREATE_TENANT_TABLE: &str = "CREATE TABLE IF NOT EXISTS tenant (
    tenant_id TEXT NOT NULL PRIMARY KEY,
    secret_key TEXT NOT NULL
)";

const CREATE_APPLICATION_TABLE: &str = "CREATE TABLE IF NOT EXISTS application (
    tenant_id TEXT NOT NULL,
    application_id TEXT NOT NULL,
    name TEXT NOT NULL,
    PRIMARY KEY (tenant_id, application_id)
)";

/// Creates the registry tables if they do not exist.
pub fn initialize_schema(conn: &Connection) -> Result<(), BackendError> {
    for (table, ddl) in [
        ("tenant", CREATE_TENANT_TABLE),
        ("application", CREATE_APPLICATION_TABLE),
    ] {
        conn.execute(ddl, []).map_err(|e| BackendError::SchemaError {
            message: format!("Failed to create {} table: {}", table, e),
        })?;
    }

    tracing::info!("SQLite registry schema ready");
    Ok(())
}
