//! Core storage traits and abstractions.
//!
//! This module provides the foundational traits for the persistence layer:
//!
//! - [`StorageGateway`] - Database driver abstraction, one session per operation
//! - [`RegistrySession`] - Single-row reads and writes on the registry tables
//! - [`IdGenerator`] - Source of fresh identifiers
//! - [`RegistryStorage`] - The tenant and application operations
//!
//! # Layering
//!
//! ```text
//! RegistryStorage (TenantDataService)
//!     ├── TenantStore ──────┐
//!     └── ApplicationStore ─┴── StorageGateway ── RegistrySession
//!                           └── IdGenerator
//! ```

pub mod backend;
pub mod id_generator;
pub mod session;
pub mod storage;

// Re-export main types
pub use backend::{BackendKind, StorageGateway};
pub use id_generator::{IdGenerator, RandomIdGenerator};
pub use session::RegistrySession;
pub use storage::RegistryStorage;
