//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the registry data access
//! layer, following a hierarchy that separates caller-contract violations,
//! field validation, missing entities, identifier generation and backend failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::{ApplicationId, TenantId};

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A structurally required argument was missing
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Field validation errors (raised by callers before reaching the stores)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Tenant or application state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Identifier generator failures, propagated unchanged
    #[error(transparent)]
    IdGeneration(#[from] IdGenerationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns `true` if the targeted tenant or application does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(_))
    }

    /// Returns `true` for infrastructure failures (session, query, timeout).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Backend(_))
    }

    /// Returns `true` if the caller broke the operation's contract.
    pub fn is_precondition(&self) -> bool {
        matches!(self, StorageError::Precondition(_))
    }
}

/// Violations of the caller contract.
///
/// These are programming errors on the caller's side and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// An identifier argument was the empty identifier.
    #[error("{field} must be provided")]
    EmptyIdentifier { field: &'static str },
}

/// Errors related to field validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing required field.
    #[error("{field} must be provided")]
    MissingRequiredField { field: &'static str },

    /// The field only contains whitespace.
    #[error("{field} must not be whitespace")]
    Whitespace { field: &'static str },
}

/// Errors related to tenant and application state.
///
/// The messages are matched on by upstream callers and must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The tenant does not exist.
    #[error("Tenant not found. Tenant ID: {tenant_id}")]
    TenantNotFound { tenant_id: TenantId },

    /// The application does not exist under an existing tenant.
    #[error("Tenant Application not found. Tenant ID: {tenant_id}, Application ID: {application_id}")]
    ApplicationNotFound {
        tenant_id: TenantId,
        application_id: ApplicationId,
    },
}

/// Error reported by an identifier generator.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct IdGenerationError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl IdGenerationError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// A round trip did not complete in time.
    #[error("{operation} on {backend_name} timed out after {timeout_ms}ms")]
    Timeout {
        backend_name: String,
        operation: String,
        timeout_ms: u64,
    },

    /// Schema initialisation error.
    #[error("schema initialisation failed: {message}")]
    SchemaError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored row could not be decoded.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Implement conversions from driver error types

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "cassandra")]
impl From<cdrs_tokio::error::Error> for StorageError {
    fn from(err: cdrs_tokio::error::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "cassandra".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}
