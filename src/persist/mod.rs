//! Persistence Module
//!
//! Coalesced background persistence for the in-memory store.
//!
//! ## Responsibilities
//! - Single-slot wake-up signal shared by all mutators
//! - One long-lived writer thread owning the backing file
//! - Full-file snapshot overwrite on every write cycle
//!
//! ## Design
//! The trigger holds at most one pending wake-up, so a burst of N mutations
//! may produce as few as one file write. This is a deliberate consistency
//! relaxation: callers never wait on file I/O, the file never sees
//! interleaved writes from racing threads, and the backing file lags the
//! in-memory map by at most one write cycle. A crash between a successful
//! mutation and the next completed write loses that mutation from the file;
//! the in-memory store remains correct for the life of the process.

mod trigger;
mod writer;

pub use trigger::{WriteToken, WriteTrigger};
pub use writer::SnapshotWriter;

pub(crate) use writer::write_snapshot;
