//! Test infrastructure for the registry persistence layer.
//!
//! Backends, identifier generators with scripted output, and a gateway
//! wrapper that counts sessions and writes so tests can assert that a
//! rejected call never reached the store.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use tenant_registry_persistence::backends::sqlite::{
    SqliteBackend, SqliteBackendConfig, SqliteSession,
};
use tenant_registry_persistence::core::{BackendKind, RegistrySession, StorageGateway};
use tenant_registry_persistence::error::{BackendError, IdGenerationError, StorageResult};
use tenant_registry_persistence::{
    Application, ApplicationId, IdGenerator, RandomIdGenerator, Tenant, TenantDataService,
    TenantId,
};

/// In-memory backend with the schema in place.
///
/// The pool checkout timeout is short so a leaked session fails the test
/// instead of stalling it.
pub fn create_backend() -> SqliteBackend {
    let config = SqliteBackendConfig {
        connection_timeout_ms: 500,
        ..Default::default()
    };
    let backend =
        SqliteBackend::with_config(":memory:", config).expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// Service over a fresh in-memory backend with random identifiers.
pub fn create_service() -> TenantDataService<SqliteBackend> {
    TenantDataService::new(Arc::new(create_backend()), Arc::new(RandomIdGenerator))
}

/// Service over a fresh in-memory backend, wrapped to count store traffic.
pub fn create_recording_service(
    id_generator: Arc<dyn IdGenerator>,
) -> (TenantDataService<RecordingGateway<SqliteBackend>>, Arc<Counters>) {
    let gateway = RecordingGateway::new(create_backend());
    let counters = gateway.counters();
    (TenantDataService::new(Arc::new(gateway), id_generator), counters)
}

pub fn random_tenant_id() -> TenantId {
    TenantId::new(Uuid::new_v4())
}

pub fn random_application_id() -> ApplicationId {
    ApplicationId::new(Uuid::new_v4())
}

// ============================================================================
// Identifier generators
// ============================================================================

/// Hands out a scripted list of identifiers, then fails.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    ids: Mutex<VecDeque<Uuid>>,
    calls: AtomicUsize,
}

impl SequenceIdGenerator {
    pub fn new(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn generate_id(&self) -> Result<Uuid, IdGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| IdGenerationError::new("identifier sequence exhausted"))
    }
}

/// Always fails.
#[derive(Debug, Default)]
pub struct FailingIdGenerator {
    calls: AtomicUsize,
}

impl FailingIdGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdGenerator for FailingIdGenerator {
    fn generate_id(&self) -> Result<Uuid, IdGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(IdGenerationError::new("entropy source unavailable"))
    }
}

// ============================================================================
// Gateways
// ============================================================================

/// Store traffic observed through a [`RecordingGateway`].
#[derive(Debug, Default)]
pub struct Counters {
    sessions: AtomicUsize,
    writes: AtomicUsize,
}

impl Counters {
    pub fn sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

/// Wraps a gateway and counts opened sessions and issued writes.
#[derive(Debug)]
pub struct RecordingGateway<G> {
    inner: G,
    counters: Arc<Counters>,
}

impl<G> RecordingGateway<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

pub struct RecordingSession<S> {
    inner: S,
    counters: Arc<Counters>,
}

impl<S> RecordingSession<S> {
    fn record_write(&self) {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: RegistrySession> RegistrySession for RecordingSession<S> {
    async fn select_tenant(&mut self, tenant_id: TenantId) -> StorageResult<Option<Tenant>> {
        self.inner.select_tenant(tenant_id).await
    }

    async fn upsert_tenant(&mut self, tenant_id: TenantId, tenant: &Tenant) -> StorageResult<()> {
        self.record_write();
        self.inner.upsert_tenant(tenant_id, tenant).await
    }

    async fn delete_tenant(&mut self, tenant_id: TenantId) -> StorageResult<()> {
        self.record_write();
        self.inner.delete_tenant(tenant_id).await
    }

    async fn select_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<Option<Application>> {
        self.inner.select_application(tenant_id, application_id).await
    }

    async fn select_applications(
        &mut self,
        tenant_id: TenantId,
    ) -> StorageResult<Vec<(ApplicationId, Application)>> {
        self.inner.select_applications(tenant_id).await
    }

    async fn upsert_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
        application: &Application,
    ) -> StorageResult<()> {
        self.record_write();
        self.inner
            .upsert_application(tenant_id, application_id, application)
            .await
    }

    async fn delete_application(
        &mut self,
        tenant_id: TenantId,
        application_id: ApplicationId,
    ) -> StorageResult<()> {
        self.record_write();
        self.inner.delete_application(tenant_id, application_id).await
    }
}

#[async_trait]
impl<G: StorageGateway> StorageGateway for RecordingGateway<G> {
    type Session = RecordingSession<G::Session>;

    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn open_session(&self) -> Result<Self::Session, BackendError> {
        self.counters.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingSession {
            inner: self.inner.open_session().await?,
            counters: Arc::clone(&self.counters),
        })
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.inner.health_check().await
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        self.inner.initialize().await
    }
}

/// A gateway whose store cannot be reached.
pub struct UnreachableGateway;

impl fmt::Debug for UnreachableGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnreachableGateway")
    }
}

fn unreachable_error() -> BackendError {
    BackendError::Unavailable {
        backend_name: "unreachable".to_string(),
        message: "no contact point answered".to_string(),
    }
}

#[async_trait]
impl StorageGateway for UnreachableGateway {
    type Session = SqliteSession;

    fn kind(&self) -> BackendKind {
        BackendKind::Custom("unreachable")
    }

    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn open_session(&self) -> Result<Self::Session, BackendError> {
        Err(unreachable_error())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Err(unreachable_error())
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        Err(unreachable_error())
    }
}

/// A gateway whose sessions open, but whose reads time out.
///
/// Writes are counted and otherwise ignored.
#[derive(Debug, Default)]
pub struct TimedOutReadGateway {
    counters: Arc<Counters>,
}

impl TimedOutReadGateway {
    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

pub struct TimedOutReadSession {
    counters: Arc<Counters>,
}

impl TimedOutReadSession {
    fn timeout<T>(operation: &str) -> StorageResult<T> {
        Err(BackendError::Timeout {
            backend_name: "timed-out".to_string(),
            operation: operation.to_string(),
            timeout_ms: 10,
        }
        .into())
    }

    fn record_write(&self) -> StorageResult<()> {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl RegistrySession for TimedOutReadSession {
    async fn select_tenant(&mut self, _tenant_id: TenantId) -> StorageResult<Option<Tenant>> {
        Self::timeout("select tenant")
    }

    async fn upsert_tenant(&mut self, _tenant_id: TenantId, _tenant: &Tenant) -> StorageResult<()> {
        self.record_write()
    }

    async fn delete_tenant(&mut self, _tenant_id: TenantId) -> StorageResult<()> {
        self.record_write()
    }

    async fn select_application(
        &mut self,
        _tenant_id: TenantId,
        _application_id: ApplicationId,
    ) -> StorageResult<Option<Application>> {
        Self::timeout("select application")
    }

    async fn select_applications(
        &mut self,
        _tenant_id: TenantId,
    ) -> StorageResult<Vec<(ApplicationId, Application)>> {
        Self::timeout("select applications")
    }

    async fn upsert_application(
        &mut self,
        _tenant_id: TenantId,
        _application_id: ApplicationId,
        _application: &Application,
    ) -> StorageResult<()> {
        self.record_write()
    }

    async fn delete_application(
        &mut self,
        _tenant_id: TenantId,
        _application_id: ApplicationId,
    ) -> StorageResult<()> {
        self.record_write()
    }
}

#[async_trait]
impl StorageGateway for TimedOutReadGateway {
    type Session = TimedOutReadSession;

    fn kind(&self) -> BackendKind {
        BackendKind::Custom("timed-out")
    }

    fn name(&self) -> &'static str {
        "timed-out"
    }

    async fn open_session(&self) -> Result<Self::Session, BackendError> {
        self.counters.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(TimedOutReadSession {
            counters: Arc::clone(&self.counters),
        })
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
