//! Cassandra backend implementation.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cdrs_tokio::authenticators::StaticPasswordAuthenticatorProvider;
use cdrs_tokio::cluster::session::{Session, SessionBuilder, TcpSessionBuilder};
use cdrs_tokio::cluster::{NodeTcpConfigBuilder, TcpConnectionManager};
use cdrs_tokio::consistency::Consistency;
use cdrs_tokio::frame::Version;
use cdrs_tokio::load_balancing::RoundRobinLoadBalancingStrategy;
use cdrs_tokio::transport::TransportTcp;
use serde::{Deserialize, Serialize};

use crate::core::{BackendKind, StorageGateway};
use crate::error::{BackendError, StorageError, StorageResult};

use super::schema;
use super::session::{CassandraSession, Statements};

/// The driver session type shared by every registry operation.
pub(crate) type CurrentSession = Session<
    TransportTcp,
    TcpConnectionManager,
    RoundRobinLoadBalancingStrategy<TransportTcp, TcpConnectionManager>,
>;

const DEFAULT_CQL_PORT: u16 = 9042;

/// Cassandra backend for the registry tables.
///
/// The driver session owns one connection pool per node. Registry sessions
/// are cheap handles onto it; each statement checks out a pooled connection
/// for its own round trip.
pub struct CassandraBackend {
    session: Arc<CurrentSession>,
    statements: Arc<Statements>,
    config: CassandraConfig,
}

impl Debug for CassandraBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CassandraBackend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read/write consistency level for registry statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CassandraConsistency {
    /// A single replica.
    One,
    /// A majority of replicas.
    #[default]
    Quorum,
    /// A majority of replicas in the local datacenter.
    LocalQuorum,
    /// Every replica.
    All,
}

impl From<CassandraConsistency> for Consistency {
    fn from(value: CassandraConsistency) -> Self {
        match value {
            CassandraConsistency::One => Consistency::One,
            CassandraConsistency::Quorum => Consistency::Quorum,
            CassandraConsistency::LocalQuorum => Consistency::LocalQuorum,
            CassandraConsistency::All => Consistency::All,
        }
    }
}

impl std::str::FromStr for CassandraConsistency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "one" => Ok(Self::One),
            "quorum" => Ok(Self::Quorum),
            "local_quorum" => Ok(Self::LocalQuorum),
            "all" => Ok(Self::All),
            other => Err(format!("unknown consistency level '{}'", other)),
        }
    }
}

/// Configuration for the Cassandra backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CassandraConfig {
    /// Contact points as `host` or `host:port`.
    #[serde(default = "default_contact_points")]
    pub contact_points: Vec<String>,

    /// Keyspace holding the `tenant` and `application` tables.
    #[serde(default = "default_keyspace")]
    pub keyspace: String,

    /// Native protocol version (3, 4 or 5). The driver default when unset.
    #[serde(default)]
    pub protocol_version: Option<u8>,

    /// Username for password authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for password authentication.
    #[serde(default)]
    pub password: Option<String>,

    /// Consistency level for every statement.
    #[serde(default)]
    pub consistency: CassandraConsistency,

    /// Per-round-trip timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Replication factor used when the keyspace is created by `init_schema`.
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u32,
}

fn default_contact_points() -> Vec<String> {
    vec![format!("127.0.0.1:{}", DEFAULT_CQL_PORT)]
}

fn default_keyspace() -> String {
    "tenant_registry".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_replication_factor() -> u32 {
    1
}

impl Default for CassandraConfig {
    fn default() -> Self {
        Self {
            contact_points: default_contact_points(),
            keyspace: default_keyspace(),
            protocol_version: None,
            username: None,
            password: None,
            consistency: CassandraConsistency::default(),
            request_timeout_ms: default_request_timeout_ms(),
            replication_factor: default_replication_factor(),
        }
    }
}

impl CassandraConfig {
    /// Validates the configuration.
    ///
    /// The keyspace is spliced into CQL text, so it must be a plain identifier.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.contact_points.iter().all(|p| p.trim().is_empty()) {
            errors.push("At least one contact point is required".to_string());
        }

        if !is_cql_identifier(&self.keyspace) {
            errors.push(format!(
                "Keyspace '{}' must start with a letter and contain only letters, digits and '_' (max 48)",
                self.keyspace
            ));
        }

        if let Some(version) = self.protocol_version {
            if !(3..=5).contains(&version) {
                errors.push(format!("Unsupported protocol version {}", version));
            }
        }

        if self.username.is_some() != self.password.is_some() {
            errors.push("Username and password must be set together".to_string());
        }

        if self.request_timeout_ms == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.replication_factor == 0 {
            errors.push("Replication factor cannot be 0".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Contact points with the default CQL port filled in.
    pub fn contact_addresses(&self) -> Vec<String> {
        self.contact_points
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| {
                if p.contains(':') {
                    p.to_string()
                } else {
                    format!("{}:{}", p, DEFAULT_CQL_PORT)
                }
            })
            .collect()
    }

    fn version(&self) -> Option<Version> {
        match self.protocol_version {
            Some(3) => Some(Version::V3),
            Some(4) => Some(Version::V4),
            Some(5) => Some(Version::V5),
            _ => None,
        }
    }
}

pub(crate) fn is_cql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 48 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn driver_error(err: cdrs_tokio::error::Error) -> BackendError {
    BackendError::Internal {
        backend_name: "cassandra".to_string(),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

impl CassandraBackend {
    /// Connects to the cluster described by `config`.
    pub async fn connect(config: CassandraConfig) -> StorageResult<Self> {
        if let Err(errors) = config.validate() {
            return Err(StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "cassandra".to_string(),
                message: errors.join("; "),
            }));
        }

        let mut builder = NodeTcpConfigBuilder::new();
        for address in config.contact_addresses() {
            builder = builder.with_contact_point(address.into());
        }
        if let Some(version) = config.version() {
            builder = builder.with_version(version);
        }
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.with_authenticator_provider(Arc::new(
                StaticPasswordAuthenticatorProvider::new(username.clone(), password.clone()),
            ));
        }

        let cluster_config = builder.build().await.map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "cassandra".to_string(),
                message: e.to_string(),
            })
        })?;

        let session = TcpSessionBuilder::new(RoundRobinLoadBalancingStrategy::new(), cluster_config)
            .build()
            .await
            .map_err(|e| {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: "cassandra".to_string(),
                    message: e.to_string(),
                })
            })?;

        tracing::info!(
            contact_points = ?config.contact_addresses(),
            keyspace = %config.keyspace,
            consistency = ?config.consistency,
            "Connected Cassandra registry backend"
        );

        Ok(Self {
            session: Arc::new(session),
            statements: Arc::new(Statements::new(&config.keyspace)),
            config,
        })
    }

    /// Creates the keyspace and the registry tables if they are missing.
    pub async fn init_schema(&self) -> StorageResult<()> {
        schema::initialize_schema(
            &self.session,
            &self.config.keyspace,
            self.config.replication_factor,
        )
        .await?;
        Ok(())
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &CassandraConfig {
        &self.config
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }
}

#[async_trait]
impl StorageGateway for CassandraBackend {
    type Session = CassandraSession;

    fn kind(&self) -> BackendKind {
        BackendKind::Cassandra
    }

    fn name(&self) -> &'static str {
        "cassandra"
    }

    async fn open_session(&self) -> Result<Self::Session, BackendError> {
        Ok(CassandraSession::new(
            Arc::clone(&self.session),
            Arc::clone(&self.statements),
            self.config.consistency.into(),
            self.request_timeout(),
        ))
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let ping = self.session.query("SELECT release_version FROM system.local");
        match tokio::time::timeout(self.request_timeout(), ping).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BackendError::Unavailable {
                backend_name: "cassandra".to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(BackendError::Timeout {
                backend_name: "cassandra".to_string(),
                operation: "health check".to_string(),
                timeout_ms: self.config.request_timeout_ms,
            }),
        }
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        schema::initialize_schema(
            &self.session,
            &self.config.keyspace,
            self.config.replication_factor,
        )
        .await
    }
}
