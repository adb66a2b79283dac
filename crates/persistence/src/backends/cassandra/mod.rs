//! Cassandra backend implementation.
//!
//! Tables live in one keyspace. `application` is partitioned by `tenant_id`
//! so listing a tenant's applications is a single-partition scan. There is
//! no referential link between the two tables.
//!
//! ```cql
//! CREATE TABLE tenant (
//!     tenant_id uuid PRIMARY KEY,
//!     secret_key text
//! );
//!
//! CREATE TABLE application (
//!     tenant_id uuid,
//!     application_id uuid,
//!     name text,
//!     PRIMARY KEY (tenant_id, application_id)
//! );
//! ```

mod backend;
mod schema;
mod session;

pub use backend::{CassandraBackend, CassandraConfig, CassandraConsistency};
pub use session::CassandraSession;
