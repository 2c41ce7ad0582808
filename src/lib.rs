//! # pantrydb
//!
//! A file-backed in-memory customer store with:
//! - Zero-I/O reads served straight from a concurrent map
//! - Monotonic id allocation, safe under concurrent creates
//! - A single background writer persisting full JSON snapshots
//! - Coalesced write triggering (N mutations, as few as one file write)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Callers                              │
//! │             (CLI, HTTP controller, tests)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Repository trait
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      FileStore                              │
//! │         (mutate the map, then signal the writer)            │
//! └──────────┬─────────────────────────────┬────────────────────┘
//!            │                             │ signal (coalesced)
//!     ┌──────▼───────┐             ┌───────▼────────┐
//!     │ CustomerMap  │             │ SnapshotWriter │
//!     │ (RwLock map  │◄────────────┤  (one thread,  │
//!     │ + id counter)│  snapshot   │ full overwrite)│
//!     └──────────────┘             └───────┬────────┘
//!                                          │
//!                                  ┌───────▼────────┐
//!                                  │ database.json  │
//!                                  └────────────────┘
//! ```
//!
//! Reads never touch the trigger or the writer. A mutation returns as soon
//! as the in-memory change lands; the backing file converges within one
//! write cycle once mutations stop.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod snapshot;
pub mod store;
pub mod persist;
pub mod repository;
pub mod file_store;
pub mod memory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use record::Customer;
pub use repository::Repository;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pantrydb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
