use daylog_core::Store;
use tempfile::TempDir;

/// Helper function to create a store rooted in a temporary directory
pub fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store =
        Store::open(Some(temp_dir.path().to_path_buf())).expect("Failed to open test store");
    (temp_dir, store)
}
