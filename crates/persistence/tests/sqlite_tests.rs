//! SQLite backend integration tests.
//!
//! These tests exercise the gateway and session primitives directly.

use uuid::Uuid;

use tenant_registry_persistence::backends::sqlite::SqliteBackend;
use tenant_registry_persistence::core::{BackendKind, RegistrySession, StorageGateway};
use tenant_registry_persistence::{Application, ApplicationId, Tenant, TenantId};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

#[tokio::test]
async fn test_gateway_identity() {
    let backend = create_backend();

    assert_eq!(backend.kind(), BackendKind::Sqlite);
    assert_eq!(backend.name(), "sqlite");
    assert!(backend.is_memory());
    backend.health_check().await.unwrap();
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.initialize().await.unwrap();

    let tenant_id = TenantId::new(Uuid::new_v4());
    {
        let mut session = backend.open_session().await.unwrap();
        session
            .upsert_tenant(tenant_id, &Tenant::new("S1"))
            .await
            .unwrap();
    }

    backend.initialize().await.unwrap();

    let mut session = backend.open_session().await.unwrap();
    assert_eq!(
        session.select_tenant(tenant_id).await.unwrap(),
        Some(Tenant::new("S1"))
    );
}

#[tokio::test]
async fn test_in_memory_backends_are_independent() {
    let first = create_backend();
    let second = create_backend();
    let tenant_id = TenantId::new(Uuid::new_v4());

    first
        .open_session()
        .await
        .unwrap()
        .upsert_tenant(tenant_id, &Tenant::new("S1"))
        .await
        .unwrap();

    let mut session = second.open_session().await.unwrap();
    assert_eq!(session.select_tenant(tenant_id).await.unwrap(), None);
}

#[tokio::test]
async fn test_orphaned_rows_are_visible_to_the_scan() {
    let backend = create_backend();
    let tenant_id = TenantId::new(Uuid::new_v4());
    let application_id = ApplicationId::new(Uuid::new_v4());

    let mut session = backend.open_session().await.unwrap();
    session
        .upsert_application(tenant_id, application_id, &Application::new("A1"))
        .await
        .unwrap();

    assert_eq!(session.select_tenant(tenant_id).await.unwrap(), None);
    assert_eq!(
        session.select_applications(tenant_id).await.unwrap(),
        vec![(application_id, Application::new("A1"))]
    );
    assert_eq!(
        session
            .select_application(tenant_id, application_id)
            .await
            .unwrap(),
        Some(Application::new("A1"))
    );
}
