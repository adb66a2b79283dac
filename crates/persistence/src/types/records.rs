//! Stored entity payloads.
//!
//! Identifiers are not part of the payloads: a [`Tenant`] is addressed by its
//! [`TenantId`](super::TenantId) and an [`Application`] by the pair of tenant
//! and application identifiers.

use serde::{Deserialize, Serialize};

/// The mutable part of a tenant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// The tenant's secret key.
    pub secret_key: String,
}

impl Tenant {
    /// Creates a tenant payload.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }
}

/// The mutable part of an application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// The application's display name.
    pub name: String,
}

impl Application {
    /// Creates an application payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
