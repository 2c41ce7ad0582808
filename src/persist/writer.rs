//! Background writer
//!
//! The single thread that persists store snapshots to the backing file.

use std::fs;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::error::Result;
use crate::snapshot;
use crate::store::CustomerMap;

use super::WriteToken;

/// The background persistence worker
///
/// Exactly one instance exists per store: construction consumes the write
/// token (the receiving half of the trigger), so a second writer against the
/// same backing file cannot be built. Two writers interleaving partial
/// overwrites of one file would corrupt it.
pub struct SnapshotWriter {
    /// Shared in-memory state, read at each write cycle
    map: Arc<CustomerMap>,

    /// Backing file path and snapshot formatting
    config: Config,

    /// Wake-up source; `wait` returning false ends the loop
    token: WriteToken,
}

impl SnapshotWriter {
    /// Create a writer for the given store and backing file
    pub fn new(map: Arc<CustomerMap>, config: Config, token: WriteToken) -> Self {
        Self { map, config, token }
    }

    /// Spawn the writer onto its own named thread
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name("pantrydb-writer".to_string())
            .spawn(move || self.run())?;

        Ok(handle)
    }

    /// Writer loop: wait for a signal, write a full snapshot, repeat
    ///
    /// A failed write is logged and retried on the next signal only; it never
    /// reaches the caller whose mutation triggered it, because that mutation
    /// already succeeded against the in-memory store.
    fn run(self) {
        tracing::debug!(path = %self.config.db_path.display(), "snapshot writer started");

        while self.token.wait() {
            if let Err(e) = write_snapshot(&self.map, &self.config) {
                tracing::error!(error = %e, "background snapshot write failed");
            }
        }

        tracing::debug!("snapshot writer stopped");
    }
}

/// Serialize the current store contents and overwrite the backing file
///
/// Full-file overwrite: each call replaces the entire file with the current
/// complete snapshot. Also used by the facade's close path for the final
/// synchronous drain.
pub(crate) fn write_snapshot(map: &CustomerMap, config: &Config) -> Result<()> {
    let records = map.get_all();
    let bytes = snapshot::encode(&records, config.pretty)?;
    fs::write(&config.db_path, bytes)?;

    tracing::debug!(records = records.len(), "snapshot written");
    Ok(())
}
