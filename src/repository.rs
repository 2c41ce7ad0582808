//! Repository contract
//!
//! The seam between store implementations and their callers. A boundary
//! layer (CLI, HTTP controller, test harness) programs against this trait
//! and maps the error kinds to its own outcomes; the kinds cross this
//! boundary unchanged, never wrapped.

use crate::error::Result;
use crate::record::Customer;

/// Keyed CRUD operations over customer records
pub trait Repository: Send + Sync {
    /// Look up a record by id; absent is not an error
    fn get(&self, id: u64) -> Option<Customer>;

    /// Point-in-time copy of every record, in no particular order
    fn get_all(&self) -> Vec<Customer>;

    /// Insert a new record under a freshly allocated id
    ///
    /// The returned record carries the assigned id; any id on the candidate
    /// is ignored. Fails with `InvalidArgument` on an unusable candidate.
    fn create(&self, candidate: Customer) -> Result<Customer>;

    /// Replace the stored value for `record.id`
    ///
    /// Fails with `InvalidArgument` on an unusable record and `NotFound`
    /// when the id is not present.
    fn update(&self, record: Customer) -> Result<()>;

    /// Remove the record with the given id
    ///
    /// Fails with `NotFound` when the id is not present. The id is never
    /// reissued to a later create.
    fn delete(&self, id: u64) -> Result<()>;
}
