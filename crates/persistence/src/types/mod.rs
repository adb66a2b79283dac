//! Core types for the persistence layer.
//!
//! - [`TenantId`], [`ApplicationId`] - UUID-backed entity identifiers
//! - [`Tenant`], [`Application`] - The mutable payload of each row
//!
//! # Examples
//!
//! ```
//! use tenant_registry_persistence::types::{Application, ApplicationId, Tenant, TenantId};
//! use uuid::Uuid;
//!
//! let tenant_id = TenantId::new(Uuid::new_v4());
//! let tenant = Tenant::new("s3cr3t");
//! let application = Application::new("billing");
//!
//! assert!(!tenant_id.is_empty());
//! assert!(ApplicationId::EMPTY.is_empty());
//! assert_eq!(tenant.secret_key, "s3cr3t");
//! assert_eq!(application.name, "billing");
//! ```

mod id;
mod records;

pub use id::{ApplicationId, TenantId};
pub use records::{Application, Tenant};
