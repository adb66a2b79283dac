//! Cassandra backend integration tests.
//!
//! Set `CASSANDRA_ADDRESS` (`host:port`) to run against an existing node;
//! otherwise a single Cassandra container is started for the test process.
//! Each test works in its own keyspace.

#![cfg(feature = "cassandra")]

use std::sync::Arc;
use std::time::Duration;

use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::sync::OnceCell;
use uuid::Uuid;

use tenant_registry_persistence::backends::cassandra::{
    CassandraBackend, CassandraConfig, CassandraConsistency,
};
use tenant_registry_persistence::error::{ResourceError, StorageError};
use tenant_registry_persistence::{
    Application, RandomIdGenerator, RegistryStorage, StorageGateway, Tenant, TenantDataService,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CASSANDRA_IMAGE: &str = "cassandra";
const CASSANDRA_TAG: &str = "4.1";

/// Shared Cassandra node.
struct CassandraHarness {
    address: String,
    /// Kept alive for the full test process lifetime.
    _container: Option<ContainerAsync<GenericImage>>,
}

static SHARED_CASSANDRA: OnceCell<CassandraHarness> = OnceCell::const_new();

impl CassandraHarness {
    async fn shared() -> &'static CassandraHarness {
        SHARED_CASSANDRA
            .get_or_init(|| async {
                Self::start()
                    .await
                    .expect("failed to initialize shared Cassandra harness")
            })
            .await
    }

    async fn start() -> Result<Self, BoxError> {
        if let Ok(address) = std::env::var("CASSANDRA_ADDRESS") {
            return Ok(Self {
                address,
                _container: None,
            });
        }

        let container = GenericImage::new(CASSANDRA_IMAGE, CASSANDRA_TAG)
            .with_exposed_port(9042.tcp())
            .with_wait_for(WaitFor::message_on_stdout(
                "Starting listening for CQL clients",
            ))
            .with_env_var("MAX_HEAP_SIZE", "512M")
            .with_env_var("HEAP_NEWSIZE", "128M")
            .with_startup_timeout(Duration::from_secs(240))
            .start()
            .await?;

        let port = container.get_host_port_ipv4(9042).await?;
        Ok(Self {
            address: format!("127.0.0.1:{}", port),
            _container: Some(container),
        })
    }

    async fn backend(&self) -> CassandraBackend {
        let config = CassandraConfig {
            contact_points: vec![self.address.clone()],
            keyspace: format!("registry_{}", Uuid::new_v4().simple()),
            consistency: CassandraConsistency::Quorum,
            request_timeout_ms: 20_000,
            ..Default::default()
        };
        let backend = CassandraBackend::connect(config)
            .await
            .expect("Failed to connect to Cassandra");
        backend.init_schema().await.expect("Failed to create schema");
        backend
    }
}

async fn create_service() -> TenantDataService<CassandraBackend> {
    let backend = CassandraHarness::shared().await.backend().await;
    TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator))
}

#[tokio::test]
async fn test_cassandra_health_check() {
    let service = create_service().await;
    service.gateway().health_check().await.unwrap();
    assert_eq!(service.backend_name(), "cassandra");
}

#[tokio::test]
async fn test_cassandra_tenant_lifecycle() {
    let service = create_service().await;

    let tenant_id = service.create_tenant(Tenant::new("S1")).await.unwrap();
    assert_eq!(service.read_tenant(tenant_id).await.unwrap().secret_key, "S1");

    service
        .update_tenant(tenant_id, Tenant::new("S2"))
        .await
        .unwrap();
    assert_eq!(service.read_tenant(tenant_id).await.unwrap().secret_key, "S2");

    service.delete_tenant(tenant_id).await.unwrap();
    let err = service.read_tenant(tenant_id).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Resource(ResourceError::TenantNotFound { .. })
    ));
}

#[tokio::test]
async fn test_cassandra_applications() {
    let service = create_service().await;
    let tenant_id = service.create_tenant(Tenant::new("S1")).await.unwrap();
    let other = service.create_tenant(Tenant::new("S2")).await.unwrap();

    let a1 = service
        .create_application(tenant_id, Application::new("A1"))
        .await
        .unwrap();
    let a2 = service
        .create_application(tenant_id, Application::new("A2"))
        .await
        .unwrap();
    service
        .create_application(other, Application::new("B1"))
        .await
        .unwrap();

    let all = service.read_all_applications(tenant_id).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[&a1].name, "A1");
    assert_eq!(all[&a2].name, "A2");

    service
        .update_application(tenant_id, a1, Application::new("A1b"))
        .await
        .unwrap();
    service.delete_application(tenant_id, a2).await.unwrap();

    let all = service.read_all_applications(tenant_id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[&a1].name, "A1b");

    let err = service.read_application(other, a1).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Resource(ResourceError::ApplicationNotFound { .. })
    ));
}

#[tokio::test]
async fn test_cassandra_missing_tenant_blocks_application_writes() {
    let service = create_service().await;
    let tenant_id = service.create_tenant(Tenant::new("S1")).await.unwrap();
    service.delete_tenant(tenant_id).await.unwrap();

    let err = service
        .create_application(tenant_id, Application::new("A1"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
