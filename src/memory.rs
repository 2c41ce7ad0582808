//! In-memory test double
//!
//! A seedable [`Repository`] with the same id-allocation and error semantics
//! as the file-backed store, and no persistence. Intended for tests of code
//! that takes a `&dyn Repository`.

use crate::error::Result;
use crate::record::Customer;
use crate::repository::Repository;
use crate::store::CustomerMap;

/// Seedable in-memory repository
pub struct MemoryStore {
    map: CustomerMap,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            map: CustomerMap::new(),
        }
    }

    /// Create a store pre-populated with the given records
    pub fn seeded(records: Vec<Customer>) -> Self {
        Self {
            map: CustomerMap::from_records(records),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MemoryStore {
    fn get(&self, id: u64) -> Option<Customer> {
        self.map.get(id)
    }

    fn get_all(&self) -> Vec<Customer> {
        self.map.get_all()
    }

    fn create(&self, candidate: Customer) -> Result<Customer> {
        self.map.create(candidate)
    }

    fn update(&self, record: Customer) -> Result<()> {
        self.map.update(record)
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.map.delete(id)
    }
}
