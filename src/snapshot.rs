//! Snapshot codec
//!
//! Converts the full in-memory collection to and from the on-disk JSON
//! document.
//!
//! ## File Format
//! ```text
//! {
//!   "customers": [
//!     { "id": 1, "name": "Bob" },
//!     { "id": 2, "name": "Mary" }
//!   ]
//! }
//! ```
//!
//! The record list is wrapped in a named container rather than stored as a
//! bare array so sibling fields can be added later without breaking the
//! format. Unknown sibling fields are ignored on decode for the same reason.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::record::Customer;

/// On-disk snapshot document
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDoc {
    /// The full record collection; absent or null reads as empty
    #[serde(default)]
    customers: Option<Vec<Customer>>,
}

/// Encode the full record collection into the on-disk document
pub fn encode(customers: &[Customer], pretty: bool) -> Result<Vec<u8>> {
    let doc = SnapshotDoc {
        customers: Some(customers.to_vec()),
    };

    let bytes = if pretty {
        serde_json::to_vec_pretty(&doc)
    } else {
        serde_json::to_vec(&doc)
    };

    bytes.map_err(|e| StoreError::Format(e.to_string()))
}

/// Decode the on-disk document into a record collection
///
/// An empty document, a null document, or a document whose `customers`
/// field is absent or null all decode to an empty collection (fresh start).
/// Anything else that fails to parse is a format error: corruption must not
/// be silently read as an empty store.
pub fn decode(bytes: &[u8]) -> Result<Vec<Customer>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let doc: Option<SnapshotDoc> =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Format(e.to_string()))?;

    Ok(doc.and_then(|d| d.customers).unwrap_or_default())
}
