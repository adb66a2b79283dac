//! Command-line configuration for the registry binary.
//!
//! Every option can also be set through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REGISTRY_BACKEND` | sqlite | Storage backend (`sqlite` or `cassandra`) |
//! | `REGISTRY_DATABASE_URL` | registry.db | SQLite database path (`:memory:` allowed) |
//! | `REGISTRY_CASSANDRA_HOSTS` | 127.0.0.1 | Comma-separated contact points |
//! | `REGISTRY_CASSANDRA_KEYSPACE` | tenant_registry | Keyspace |
//! | `REGISTRY_CASSANDRA_PROTOCOL_VERSION` | driver default | Native protocol version |
//! | `REGISTRY_LOG_LEVEL` | info | Log level |

use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};
use tenant_registry_persistence::{ApplicationId, TenantId};

/// Default SQLite database path.
pub const DEFAULT_DATABASE_PATH: &str = "registry.db";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Embedded SQLite database.
    Sqlite,
    /// Apache Cassandra cluster.
    Cassandra,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendChoice::Sqlite => write!(f, "sqlite"),
            BackendChoice::Cassandra => write!(f, "cassandra"),
        }
    }
}

/// Registry command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "tenant-registry")]
#[command(about = "Manage tenants and their applications")]
pub struct RegistryConfig {
    /// Storage backend.
    #[arg(long, env = "REGISTRY_BACKEND", value_enum, default_value = "sqlite")]
    pub backend: BackendChoice,

    /// SQLite database path.
    #[arg(long, env = "REGISTRY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Cassandra contact points, comma separated.
    #[arg(long, env = "REGISTRY_CASSANDRA_HOSTS", default_value = "127.0.0.1")]
    pub cassandra_hosts: String,

    /// Cassandra keyspace.
    #[arg(long, env = "REGISTRY_CASSANDRA_KEYSPACE", default_value = "tenant_registry")]
    pub cassandra_keyspace: String,

    /// Cassandra native protocol version.
    #[arg(long, env = "REGISTRY_CASSANDRA_PROTOCOL_VERSION")]
    pub cassandra_protocol_version: Option<u8>,

    /// Log level.
    #[arg(long, env = "REGISTRY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the registry tables (and the Cassandra keyspace) if missing.
    InitSchema,

    /// Tenant operations.
    #[command(subcommand)]
    Tenant(TenantCommand),

    /// Application operations.
    #[command(subcommand)]
    Application(ApplicationCommand),
}

/// Tenant operations.
#[derive(Debug, Clone, Subcommand)]
pub enum TenantCommand {
    /// Create a tenant and print its identifier.
    Create {
        /// The tenant's secret key.
        #[arg(long)]
        secret_key: String,
    },
    /// Print a tenant.
    Read { tenant_id: TenantId },
    /// Replace a tenant's secret key.
    Update {
        tenant_id: TenantId,
        /// The new secret key.
        #[arg(long)]
        secret_key: String,
    },
    /// Delete a tenant. Its applications are left in place.
    Delete { tenant_id: TenantId },
}

/// Application operations.
#[derive(Debug, Clone, Subcommand)]
pub enum ApplicationCommand {
    /// Create an application under a tenant and print its identifier.
    Create {
        tenant_id: TenantId,
        /// The application name.
        #[arg(long)]
        name: String,
    },
    /// Print one application.
    Read {
        tenant_id: TenantId,
        application_id: ApplicationId,
    },
    /// Print every application of a tenant.
    List { tenant_id: TenantId },
    /// Rename an application.
    Update {
        tenant_id: TenantId,
        application_id: ApplicationId,
        /// The new name.
        #[arg(long)]
        name: String,
    },
    /// Delete an application.
    Delete {
        tenant_id: TenantId,
        application_id: ApplicationId,
    },
}

impl RegistryConfig {
    /// SQLite database path, defaulting to [`DEFAULT_DATABASE_PATH`].
    pub fn database_path(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Cassandra contact points.
    pub fn cassandra_contact_points(&self) -> Vec<String> {
        self.cassandra_hosts
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.backend {
            BackendChoice::Sqlite => {
                if self.database_path().trim().is_empty() {
                    errors.push("Database URL cannot be empty".to_string());
                }
            }
            BackendChoice::Cassandra => {
                if self.cassandra_contact_points().is_empty() {
                    errors.push("At least one Cassandra host is required".to_string());
                }
                if self.cassandra_keyspace.trim().is_empty() {
                    errors.push("Cassandra keyspace cannot be empty".to_string());
                }
                if let Some(version) = self.cassandra_protocol_version {
                    if !(3..=5).contains(&version) {
                        errors.push(format!(
                            "Cassandra protocol version must be 3, 4 or 5 (got {})",
                            version
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
