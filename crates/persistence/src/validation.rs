//! Field validation for tenant and application payloads.
//!
//! The stores do not validate field contents. Callers run these checks before
//! handing a payload to [`RegistryStorage`](crate::core::RegistryStorage).

use crate::error::ValidationError;
use crate::types::{Application, Tenant};

/// Checks that the tenant's secret key is present and not blank.
pub fn validate_tenant(tenant: &Tenant) -> Result<(), ValidationError> {
    require_text(&tenant.secret_key, "secret_key")
}

/// Checks that the application's name is present and not blank.
pub fn validate_application(application: &Application) -> Result<(), ValidationError> {
    require_text(&application.name, "name")
}

fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingRequiredField { field });
    }
    if value.trim().is_empty() {
        return Err(ValidationError::Whitespace { field });
    }
    Ok(())
}
