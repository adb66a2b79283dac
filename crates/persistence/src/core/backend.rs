//! Backend abstraction for database drivers.
//!
//! This module defines the [`StorageGateway`] trait. A gateway wraps a
//! driver-managed connection pool and hands out one [`RegistrySession`] per
//! logical operation.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;

use super::session::RegistrySession;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
    /// Apache Cassandra (wide-column store).
    Cassandra,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Cassandra => write!(f, "cassandra"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A connection to the partitioned store backing the registry.
///
/// Implementations own a connection pool and must support concurrent use by
/// many in-flight operations. Each call to [`open_session`](Self::open_session)
/// scopes one pooled connection to a single logical operation; dropping the
/// session returns it, whatever the outcome of the operation.
///
/// # Example
///
/// ```ignore
/// use tenant_registry_persistence::core::{RegistrySession, StorageGateway};
///
/// async fn count_applications<G: StorageGateway>(
///     gateway: &G,
///     tenant_id: TenantId,
/// ) -> StorageResult<usize> {
///     let mut session = gateway.open_session().await?;
///     Ok(session.select_applications(tenant_id).await?.len())
/// }
/// ```
#[async_trait]
pub trait StorageGateway: Send + Sync + Debug {
    /// The session type handed out per operation.
    type Session: RegistrySession;

    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Acquires a session for one logical operation.
    async fn open_session(&self) -> Result<Self::Session, BackendError>;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates the `tenant` and `application` tables if they are missing.
    async fn initialize(&self) -> Result<(), BackendError>;
}

#[async_trait]
impl<G: StorageGateway> StorageGateway for Arc<G> {
    type Session = G::Session;

    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn open_session(&self) -> Result<Self::Session, BackendError> {
        (**self).open_session().await
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        (**self).health_check().await
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        (**self).initialize().await
    }
}
