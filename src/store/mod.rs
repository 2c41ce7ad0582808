//! Concurrent Store Module
//!
//! Thread-safe keyed storage with atomic id issuance.
//!
//! ## Responsibilities
//! - O(1) reads served straight from memory, never touching I/O
//! - Whole-record replacement that stays consistent under concurrent writers
//! - Monotonic id allocation; deleted ids are never reissued
//!
//! ## Data Structure Choice
//! HashMap behind a parking_lot RwLock plus an AtomicU64 counter:
//! - many concurrent readers, exclusive writers
//! - id allocation is lock-free, so racing creates never share an id
//! - no iteration-order guarantee (callers must not depend on one)

mod map;

pub use map::CustomerMap;
