//! Customer record definition
//!
//! The single entity type held by the store and persisted in snapshots.

use serde::{Deserialize, Serialize};

/// Id value meaning "not yet assigned"
///
/// The store allocates ids starting at 1, so an unassigned record can never
/// collide with a stored one.
pub const UNASSIGNED_ID: u64 = 0;

/// A single persisted customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique key, assigned by the store on create
    #[serde(default)]
    pub id: u64,

    /// Display name
    #[serde(default)]
    pub name: String,
}

impl Customer {
    /// Create a candidate record with no id yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
        }
    }

    /// Create a record with an explicit id (for updates and seed data)
    pub fn with_id(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
