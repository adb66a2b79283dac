//! Entity identifier types.
//!
//! This module defines [`TenantId`] and [`ApplicationId`], opaque identifiers
//! backed by UUIDs. The nil UUID is reserved as the empty identifier and never
//! names a stored entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// The empty identifier.
            pub const EMPTY: Self = Self(Uuid::nil());

            /// Wraps an existing UUID.
            pub const fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Returns `true` if this is the empty identifier.
            pub fn is_empty(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::EMPTY
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_id! {
    /// Identifier of a tenant; the partition key of the `tenant` table.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenant_registry_persistence::types::TenantId;
    ///
    /// let id: TenantId = "6a1c1f0e-4c36-4c4e-8d5a-0c0b0b9d1e01".parse().unwrap();
    /// assert!(!id.is_empty());
    /// assert!(TenantId::EMPTY.is_empty());
    /// ```
    TenantId
}

entity_id! {
    /// Identifier of an application; the clustering key of the `application` table.
    ApplicationId
}
