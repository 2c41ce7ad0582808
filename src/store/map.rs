//! CustomerMap implementation
//!
//! HashMap-based keyed store with RwLock for concurrency and an atomic id
//! counter.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::record::Customer;

/// Thread-safe map of id → record with atomic id allocation
///
/// ## Concurrency:
/// - `records`: Protected by RwLock (many concurrent readers, exclusive writer)
/// - `last_id`: Atomic counter (lock-free); only ever increments, even across
///   deletes, so an id is never handed out twice
/// - All methods use `&self` (no exclusive access needed)
#[derive(Debug)]
pub struct CustomerMap {
    /// Current value for each assigned id
    records: RwLock<HashMap<u64, Customer>>,

    /// Highest id ever assigned
    last_id: AtomicU64,
}

impl CustomerMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            last_id: AtomicU64::new(0),
        }
    }

    /// Build a map from a loaded snapshot
    ///
    /// The id counter starts at the highest id present, so records created
    /// later never collide with loaded ones.
    pub fn from_records(records: Vec<Customer>) -> Self {
        let last_id = records.iter().map(|c| c.id).max().unwrap_or(0);
        let map: HashMap<u64, Customer> = records.into_iter().map(|c| (c.id, c)).collect();

        Self {
            records: RwLock::new(map),
            last_id: AtomicU64::new(last_id),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a record by id
    ///
    /// Absent is not an error. Takes only the read lock, so lookups stay
    /// concurrent with each other.
    pub fn get(&self, id: u64) -> Option<Customer> {
        self.records.read().get(&id).cloned()
    }

    /// Point-in-time copy of all records
    ///
    /// The returned collection is detached: mutations after this call are not
    /// visible in it, and concurrent mutation during the copy cannot corrupt
    /// it. No iteration order is guaranteed.
    pub fn get_all(&self) -> Vec<Customer> {
        self.records.read().values().cloned().collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a new record under a freshly allocated id
    ///
    /// Any id carried by the candidate is overwritten. `fetch_add` hands every
    /// caller a distinct value, so two racing creates can never receive the
    /// same id. Monotonic allocation makes an occupied slot unreachable in
    /// correct operation; if it happens anyway, the insert fails rather than
    /// silently overwriting.
    pub fn create(&self, mut candidate: Customer) -> Result<Customer> {
        validate(&candidate)?;

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        candidate.id = id;

        let mut records = self.records.write();
        match records.entry(id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists { id }),
            Entry::Vacant(slot) => {
                slot.insert(candidate.clone());
                Ok(candidate)
            }
        }
    }

    /// Replace the stored value for an existing id
    ///
    /// Whole-value replacement: a concurrent `get` on the same id observes
    /// either the old or the new record, never a mixture. Last writer wins
    /// under concurrent updates to the same id.
    pub fn update(&self, record: Customer) -> Result<()> {
        validate(&record)?;

        let mut records = self.records.write();
        match records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound { id: record.id }),
        }
    }

    /// Remove a record
    ///
    /// The id counter is left untouched; removed ids are never reissued.
    pub fn delete(&self, id: u64) -> Result<()> {
        match self.records.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { id }),
        }
    }

    // =========================================================================
    // Accessors (for the facade, benches, and tests)
    // =========================================================================

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the map holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Highest id ever assigned
    pub fn last_id(&self) -> u64 {
        self.last_id.load(Ordering::SeqCst)
    }
}

impl Default for CustomerMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject a record that carries no usable payload
///
/// Checked before any state is touched, so a rejected record mutates nothing,
/// not even the id counter.
fn validate(record: &Customer) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(StoreError::InvalidArgument(
            "record name must not be blank".to_string(),
        ));
    }

    Ok(())
}
