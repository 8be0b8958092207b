//! Common test utilities

use tempfile::TempDir;
use wings_pos::store::StoreData;
use wings_pos::{FileSlot, SeedCatalog, Slot, Store};

pub const TEST_KEY: &str = "wings_cafe_db_v1";

/// Fresh data directory, removed when dropped
pub fn data_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

pub fn slot(dir: &TempDir) -> FileSlot {
    FileSlot::new(dir.path(), TEST_KEY)
}

/// Open the store in `dir` against the default catalog
pub fn open(dir: &TempDir) -> Store<FileSlot> {
    let (store, _) = Store::open(slot(dir), &SeedCatalog::default_catalog())
        .expect("Failed to open store");
    store
}

/// Raw blob currently on disk
pub fn blob_on_disk(dir: &TempDir) -> String {
    slot(dir)
        .read()
        .expect("Failed to read slot")
        .expect("Slot is empty")
}

/// Store data currently on disk
pub fn data_on_disk(dir: &TempDir) -> StoreData {
    serde_json::from_str(&blob_on_disk(dir)).expect("Failed to decode blob")
}
