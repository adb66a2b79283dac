//! SQLite backend implementation.
//!
//! An embedded stand-in for the wide-column store, used for local runs and the
//! test suite. It keeps the same two-table layout and issues only single-row
//! statements and single-partition scans, so the stores see the same
//! guarantees they get from Cassandra.
//!
//! # Example
//!
//! ```no_run
//! use tenant_registry_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tenant (
//!     tenant_id TEXT NOT NULL PRIMARY KEY,
//!     secret_key TEXT NOT NULL
//! );
//!
//! CREATE TABLE application (
//!     tenant_id TEXT NOT NULL,
//!     application_id TEXT NOT NULL,
//!     name TEXT NOT NULL,
//!     PRIMARY KEY (tenant_id, application_id)
//! );
//! ```

mod backend;
mod schema;
mod session;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use session::SqliteSession;
