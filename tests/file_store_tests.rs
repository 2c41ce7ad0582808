//! Tests for FileStore
//!
//! These tests verify:
//! - Fresh-start, reload, and corruption behavior at open
//! - Repository operations and error kinds
//! - Persistence convergence through the background writer
//! - Final drain on close
//! - Writer failures staying away from callers
//! - Concurrent mutation through the facade

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pantrydb::record::Customer;
use pantrydb::{snapshot, FileStore, Repository, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_path(temp_dir.path().join("database.json")).unwrap();
    (temp_dir, store)
}

/// Poll the backing file until its decoded contents satisfy `matches`
///
/// The writer runs asynchronously and full-file overwrites are not atomic,
/// so transiently unreadable or stale contents are expected while polling.
fn wait_for_snapshot<F>(path: &Path, matches: F) -> Vec<Customer>
where
    F: Fn(&[Customer]) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);

    loop {
        if let Ok(bytes) = fs::read(path) {
            if let Ok(records) = snapshot::decode(&bytes) {
                if matches(&records) {
                    return records;
                }
            }
        }

        assert!(
            Instant::now() < deadline,
            "backing file did not converge within the deadline"
        );
        thread::sleep(Duration::from_millis(10));
    }
}

fn sorted_ids(records: &[Customer]) -> Vec<u64> {
    let mut ids: Vec<u64> = records.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_missing_file_yields_empty_store() {
    let (_temp, store) = setup_temp_store();

    assert!(store.is_empty());
    assert_eq!(store.last_id(), 0);
    assert_eq!(store.get_all(), vec![]);
}

#[test]
fn test_open_empty_file_yields_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    fs::write(&db_path, "").unwrap();

    let store = FileStore::open_path(&db_path).unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_open_null_customers_yields_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    fs::write(&db_path, r#"{ "customers": null }"#).unwrap();

    let store = FileStore::open_path(&db_path).unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_open_corrupt_file_fails_format() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    fs::write(&db_path, "{ definitely not json").unwrap();

    // Corruption is not a fresh start; startup must refuse
    let err = FileStore::open_path(&db_path).unwrap_err();

    assert!(matches!(err, StoreError::Format(_)));
}

#[test]
fn test_open_loads_existing_records() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    fs::write(
        &db_path,
        r#"{ "customers": [ { "id": 1, "name": "a" }, { "id": 3, "name": "c" } ] }"#,
    )
    .unwrap();

    let store = FileStore::open_path(&db_path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1), Some(Customer::with_id(1, "a")));
    assert_eq!(store.get(3), Some(Customer::with_id(3, "c")));

    // The counter resumes past the highest loaded id
    assert_eq!(store.create(Customer::new("d")).unwrap().id, 4);
}

#[test]
fn test_open_creates_missing_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data").join("database.json");

    let store = FileStore::open_path(&db_path).unwrap();
    store.create(Customer::new("a")).unwrap();
    store.close().unwrap();

    assert!(db_path.exists());
}

// =============================================================================
// Repository Operation Tests
// =============================================================================

#[test]
fn test_first_create_on_empty_store() {
    let (_temp, store) = setup_temp_store();

    let created = store.create(Customer::new("a")).unwrap();

    assert_eq!(created, Customer::with_id(1, "a"));
    assert_eq!(store.get_all(), vec![Customer::with_id(1, "a")]);
}

#[test]
fn test_read_your_write() {
    let (_temp, store) = setup_temp_store();

    let created = store.create(Customer::new("a")).unwrap();

    assert_eq!(store.get(created.id), Some(created));
}

#[test]
fn test_update_then_get() {
    let (_temp, store) = setup_temp_store();
    store.create(Customer::new("a")).unwrap();

    store.update(Customer::with_id(1, "x")).unwrap();

    assert_eq!(store.get(1), Some(Customer::with_id(1, "x")));
}

#[test]
fn test_update_unknown_id_fails_not_found() {
    let (_temp, store) = setup_temp_store();
    store.create(Customer::new("a")).unwrap();

    let err = store.update(Customer::with_id(99, "x")).unwrap_err();

    assert!(matches!(err, StoreError::NotFound { id: 99 }));
}

#[test]
fn test_delete_unknown_id_fails_not_found() {
    let (_temp, store) = setup_temp_store();

    let err = store.delete(99).unwrap_err();

    assert!(matches!(err, StoreError::NotFound { id: 99 }));
    assert!(store.is_empty());
}

#[test]
fn test_invalid_candidate_rejected_without_mutation() {
    let (_temp, store) = setup_temp_store();

    assert!(matches!(
        store.create(Customer::new("")).unwrap_err(),
        StoreError::InvalidArgument(_)
    ));
    assert!(matches!(
        store.update(Customer::with_id(1, " ")).unwrap_err(),
        StoreError::InvalidArgument(_)
    ));

    assert!(store.is_empty());
    assert_eq!(store.last_id(), 0);
}

#[test]
fn test_delete_then_create_skips_deleted_id() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    fs::write(
        &db_path,
        r#"{ "customers": [
            { "id": 1, "name": "a" },
            { "id": 2, "name": "b" },
            { "id": 3, "name": "c" }
        ] }"#,
    )
    .unwrap();
    let store = FileStore::open_path(&db_path).unwrap();

    store.delete(2).unwrap();
    let created = store.create(Customer::new("d")).unwrap();

    assert_eq!(created.id, 4);
    assert_eq!(sorted_ids(&store.get_all()), vec![1, 3, 4]);
}

#[test]
fn test_usable_through_trait_object() {
    let (_temp, store) = setup_temp_store();
    let repository: &dyn Repository = &store;

    let created = repository.create(Customer::new("a")).unwrap();

    assert_eq!(repository.get(created.id), Some(created));
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_creates_converge_to_backing_file() {
    let (temp_dir, store) = setup_temp_store();
    let db_path = temp_dir.path().join("database.json");

    store.create(Customer::new("a")).unwrap();
    store.create(Customer::new("b")).unwrap();

    let persisted = wait_for_snapshot(&db_path, |records| records.len() == 2);

    assert_eq!(sorted_ids(&persisted), sorted_ids(&store.get_all()));
}

#[test]
fn test_update_converges_to_backing_file() {
    let (temp_dir, store) = setup_temp_store();
    let db_path = temp_dir.path().join("database.json");

    store.create(Customer::new("a")).unwrap();
    store.update(Customer::with_id(1, "renamed")).unwrap();

    wait_for_snapshot(&db_path, |records| {
        records.len() == 1 && records[0] == Customer::with_id(1, "renamed")
    });
}

#[test]
fn test_delete_converges_to_backing_file() {
    let (temp_dir, store) = setup_temp_store();
    let db_path = temp_dir.path().join("database.json");

    store.create(Customer::new("a")).unwrap();
    store.create(Customer::new("b")).unwrap();
    store.create(Customer::new("c")).unwrap();
    store.delete(2).unwrap();

    let persisted = wait_for_snapshot(&db_path, |records| sorted_ids(records) == [1, 3]);

    assert_eq!(sorted_ids(&persisted), sorted_ids(&store.get_all()));
}

#[test]
fn test_failed_mutations_do_not_persist() {
    let (temp_dir, store) = setup_temp_store();
    let db_path = temp_dir.path().join("database.json");

    // Failed operations never signal the writer
    let _ = store.create(Customer::new(""));
    let _ = store.delete(99);

    thread::sleep(Duration::from_millis(100));
    assert!(!db_path.exists());
}

#[test]
fn test_close_drains_final_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");

    {
        let store = FileStore::open_path(&db_path).unwrap();
        store.create(Customer::new("a")).unwrap();
        store.create(Customer::new("b")).unwrap();
        store.close().unwrap();
    }

    // No polling needed: close is synchronous
    let records = snapshot::decode(&fs::read(&db_path).unwrap()).unwrap();
    assert_eq!(sorted_ids(&records), vec![1, 2]);
}

#[test]
fn test_reopen_after_close_preserves_ids() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");

    {
        let store = FileStore::open_path(&db_path).unwrap();
        store.create(Customer::new("a")).unwrap();
        store.create(Customer::new("b")).unwrap();
        store.delete(1).unwrap();
        store.close().unwrap();
    }

    {
        let store = FileStore::open_path(&db_path).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(2), Some(Customer::with_id(2, "b")));

        // Deleted id 1 is not resurrected and not reused
        assert_eq!(store.get(1), None);
        assert_eq!(store.create(Customer::new("c")).unwrap().id, 3);
    }
}

#[test]
fn test_writer_failure_never_reaches_callers() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let db_path = data_dir.join("database.json");

    let store = FileStore::open_path(&db_path).unwrap();

    // Pull the directory out from under the writer
    fs::remove_dir_all(&data_dir).unwrap();

    // The mutation already succeeded in memory; the failed background write
    // is the writer's problem, not ours
    let created = store.create(Customer::new("a")).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(store.len(), 1);

    // The store keeps serving reads and mutations afterwards
    thread::sleep(Duration::from_millis(50));
    store.create(Customer::new("b")).unwrap();
    assert_eq!(store.len(), 2);
}

// =============================================================================
// Concurrent Access Tests
// =============================================================================

#[test]
fn test_concurrent_creates_through_facade() {
    const THREADS: usize = 10;
    const PER_THREAD: usize = 5;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("database.json");
    let store = Arc::new(FileStore::open_path(&db_path).unwrap());

    let mut handles = vec![];
    for t in 0..THREADS {
        let store_clone = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..PER_THREAD {
                store_clone
                    .create(Customer::new(format!("t{}_c{}", t, i)))
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Exactly N records with N distinct ids in memory
    let records = store.get_all();
    assert_eq!(records.len(), THREADS * PER_THREAD);

    let ids = sorted_ids(&records);
    assert_eq!(ids, (1..=(THREADS * PER_THREAD) as u64).collect::<Vec<_>>());

    // Once the writer catches up, the file holds the same fifty records
    let persisted = wait_for_snapshot(&db_path, |persisted| {
        persisted.len() == THREADS * PER_THREAD
    });
    assert_eq!(sorted_ids(&persisted), ids);
}
