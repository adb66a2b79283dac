//! Tenant Registry
//!
//! Command-line access to tenants and their applications.

mod commands;
mod config;

use std::sync::Arc;

use clap::Parser;
use tenant_registry_persistence::RandomIdGenerator;
use tenant_registry_persistence::TenantDataService;
use tracing::{error, info};

use config::{BackendChoice, Command, RegistryConfig};

#[cfg(feature = "sqlite")]
use tenant_registry_persistence::backends::sqlite::SqliteBackend;

#[cfg(feature = "cassandra")]
use tenant_registry_persistence::backends::cassandra::{CassandraBackend, CassandraConfig};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tenant_registry={level},tenant_registry_persistence={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Opens the SQLite backend and makes sure the tables exist.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &RegistryConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_path();
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = SqliteBackend::open(db_path)?;
    backend.init_schema()?;
    Ok(backend)
}

#[cfg(feature = "sqlite")]
async fn run_sqlite(config: RegistryConfig) -> anyhow::Result<serde_json::Value> {
    let backend = create_sqlite_backend(&config)?;
    let service = TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator));
    commands::execute(&service, config.command).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn run_sqlite(_config: RegistryConfig) -> anyhow::Result<serde_json::Value> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p tenant-registry --features sqlite"
    )
}

/// Connects to the Cassandra cluster named by the configuration.
#[cfg(feature = "cassandra")]
async fn create_cassandra_backend(config: &RegistryConfig) -> anyhow::Result<CassandraBackend> {
    let cassandra_config = CassandraConfig {
        contact_points: config.cassandra_contact_points(),
        keyspace: config.cassandra_keyspace.clone(),
        protocol_version: config.cassandra_protocol_version,
        ..Default::default()
    };

    info!(
        contact_points = ?cassandra_config.contact_points,
        keyspace = %cassandra_config.keyspace,
        "Initializing Cassandra backend"
    );

    Ok(CassandraBackend::connect(cassandra_config).await?)
}

#[cfg(feature = "cassandra")]
async fn run_cassandra(config: RegistryConfig) -> anyhow::Result<serde_json::Value> {
    let backend = create_cassandra_backend(&config).await?;
    let service = TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator));
    commands::execute(&service, config.command).await
}

/// Fallback when cassandra feature is not enabled.
#[cfg(not(feature = "cassandra"))]
async fn run_cassandra(_config: RegistryConfig) -> anyhow::Result<serde_json::Value> {
    anyhow::bail!(
        "The cassandra backend requires the 'cassandra' feature. \
         Build with: cargo build -p tenant-registry --features cassandra"
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistryConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let backend = config.backend;
    let is_init = matches!(config.command, Command::InitSchema);
    info!(backend = %backend, init_schema = is_init, "Starting tenant registry");

    let result = match backend {
        BackendChoice::Sqlite => run_sqlite(config).await,
        BackendChoice::Cassandra => run_cassandra(config).await,
    };

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!(backend = %backend, error = %e, "Command failed");
            Err(e)
        }
    }
}
