#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use finance_grid::{
    config::ConfigManager,
    core::LedgerManager,
    storage::{JsonFileStore, MemoryStore, StorageKeys},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const YEAR: i32 = 2026;

/// A manager over a file store in a unique directory, plus a config manager for the same base.
pub fn setup_test_env() -> (LedgerManager, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("default config");
    let store =
        JsonFileStore::new(config.resolve_store_dir(&base)).expect("create json file store");
    let manager = LedgerManager::with_config(Box::new(store), &config, YEAR);

    (manager, config_manager)
}

/// A manager over an in-memory store the caller can inspect or reopen.
pub fn memory_manager(year: i32) -> (LedgerManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = reopen(&store, year);
    (manager, store)
}

pub fn reopen(store: &Arc<MemoryStore>, year: i32) -> LedgerManager {
    LedgerManager::open(
        Box::new(store.clone()),
        StorageKeys::default(),
        year,
        "ledger",
    )
}

pub fn descriptions(manager: &LedgerManager) -> Vec<String> {
    manager
        .ledger()
        .rows()
        .iter()
        .map(|row| row.description.clone())
        .collect()
}
