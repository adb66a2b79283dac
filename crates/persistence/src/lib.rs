//! Tenant Registry Persistence Layer
//!
//! Data access for a multi-tenant registry. Tenants own a secret key and
//! zero or more applications; both live in a wide-column store as two tables
//! keyed by identifier, with no referential integrity in the store itself.
//!
//! Every write that depends on a parent checks that the parent exists first,
//! and every read or write of a missing record fails with a typed not-found
//! error. Deleting a tenant does not delete its applications.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `cassandra` - Apache Cassandra via cdrs-tokio
//!
//! # Architecture
//!
//! - [`types`] - Identifiers and record payloads
//! - [`error`] - Error types for all operations
//! - [`core`] - Gateway, session, identifier and storage traits
//! - [`store`] - Tenant and application stores
//! - [`service`] - The [`TenantDataService`] facade
//! - [`validation`] - Payload checks for the business layer
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use tenant_registry_persistence::backends::sqlite::SqliteBackend;
//! use tenant_registry_persistence::{
//!     Application, RandomIdGenerator, RegistryStorage, Tenant, TenantDataService,
//! };
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! let service = TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator));
//!
//! let tenant_id = service.create_tenant(Tenant::new("S1")).await?;
//! let application_id = service
//!     .create_application(tenant_id, Application::new("A1"))
//!     .await?;
//!
//! let applications = service.read_all_applications(tenant_id).await?;
//! assert_eq!(applications[&application_id].name, "A1");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use service::TenantDataService;
pub use types::{Application, ApplicationId, Tenant, TenantId};

// Re-export core traits
pub use core::{
    BackendKind, IdGenerator, RandomIdGenerator, RegistrySession, RegistryStorage, StorageGateway,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
