//! Entity stores.
//!
//! [`TenantStore`] and [`ApplicationStore`] decide whether a read or write may
//! proceed and then issue it through a [`StorageGateway`](crate::core::StorageGateway)
//! session. They keep no state between calls.

mod application;
mod existence;
mod tenant;

pub use application::ApplicationStore;
pub use tenant::TenantStore;
