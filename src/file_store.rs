//! FileStore
//!
//! The file-backed store facade that composes the concurrent map, the write
//! trigger, and the background writer behind the [`Repository`] contract.
//!
//! ## Responsibilities
//! - Load the backing file once, eagerly, at construction
//! - Serve reads straight from memory (no I/O on any caller path)
//! - Signal the writer exactly once after each successful mutation
//! - Keep background write failures away from callers

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::persist::{write_snapshot, SnapshotWriter, WriteTrigger};
use crate::record::Customer;
use crate::repository::Repository;
use crate::snapshot;
use crate::store::CustomerMap;

/// File-backed concurrent customer store
///
/// ## Concurrency Model
///
/// - Any number of caller threads read and mutate the map in parallel
/// - Exactly one writer thread persists snapshots, serialized with itself
/// - A mutation returns as soon as the in-memory change lands; durability is
///   eventual, bounded by the next completed write cycle
///
/// One instance owns one backing file. Construct it once at the composition
/// root and share it by reference; the spawned writer is the only component
/// that opens the file for writing.
#[derive(Debug)]
pub struct FileStore {
    /// Shared in-memory state (also held by the writer thread)
    map: Arc<CustomerMap>,

    /// Dirty signal; holds at most one pending wake-up
    trigger: WriteTrigger,

    /// Writer thread handle, joined on close
    writer: Option<JoinHandle<()>>,

    /// Construction-time configuration
    config: Config,
}

impl FileStore {
    /// Open a store backed by the file named in `config`
    ///
    /// On startup:
    /// 1. Read and decode the backing file
    /// 2. Build the map and initialize the id counter to the highest loaded id
    /// 3. Spawn the single background writer
    ///
    /// A missing backing file is a fresh start and yields an empty store. A
    /// file that exists but cannot be decoded aborts construction with
    /// `StoreError::Format`: corruption must not be silently read as empty.
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records = match fs::read(&config.db_path) {
            Ok(bytes) => snapshot::decode(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %config.db_path.display(),
            records = records.len(),
            "store loaded"
        );

        let map = Arc::new(CustomerMap::from_records(records));
        let (trigger, token) = WriteTrigger::new();
        let writer = SnapshotWriter::new(Arc::clone(&map), config.clone(), token).spawn()?;

        Ok(Self {
            map,
            trigger,
            writer: Some(writer),
            config,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().db_path(path.as_ref()).build();
        Self::open(config)
    }

    /// Write one final snapshot and stop the writer
    ///
    /// Dropping the store without calling this is allowed: the writer exits
    /// when the trigger disconnects, and any wake-up still pending at that
    /// point is best-effort.
    pub fn close(mut self) -> Result<()> {
        let result = write_snapshot(&self.map, &self.config);

        // Disconnecting the trigger ends the writer loop; join so the file is
        // quiescent when close returns.
        drop(self.trigger);
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }

        result
    }

    // =========================================================================
    // Accessors (for the CLI, benches, and tests)
    // =========================================================================

    /// Number of records currently in memory
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Highest id ever assigned
    pub fn last_id(&self) -> u64 {
        self.map.last_id()
    }

    /// The configuration this store was opened with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Repository for FileStore {
    fn get(&self, id: u64) -> Option<Customer> {
        tracing::info!(id, "get");
        self.map.get(id)
    }

    fn get_all(&self) -> Vec<Customer> {
        tracing::info!("get_all");
        self.map.get_all()
    }

    fn create(&self, candidate: Customer) -> Result<Customer> {
        tracing::info!(name = %candidate.name, "create");

        match self.map.create(candidate) {
            Ok(created) => {
                self.trigger.signal();
                Ok(created)
            }
            Err(e) => {
                // An occupied slot here means id allocation itself misbehaved
                if matches!(e, StoreError::AlreadyExists { .. }) {
                    tracing::error!(error = %e, "id allocation collision");
                }
                Err(e)
            }
        }
    }

    fn update(&self, record: Customer) -> Result<()> {
        let id = record.id;
        tracing::info!(id, "update");

        match self.map.update(record) {
            Ok(()) => {
                self.trigger.signal();
                Ok(())
            }
            Err(e) => {
                if matches!(e, StoreError::NotFound { .. }) {
                    tracing::warn!(id, "update target not found");
                }
                Err(e)
            }
        }
    }

    fn delete(&self, id: u64) -> Result<()> {
        tracing::info!(id, "delete");

        match self.map.delete(id) {
            Ok(()) => {
                self.trigger.signal();
                Ok(())
            }
            Err(e) => {
                if matches!(e, StoreError::NotFound { .. }) {
                    tracing::warn!(id, "delete target not found");
                }
                Err(e)
            }
        }
    }
}
