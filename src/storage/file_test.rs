use super::*;
use tempfile::TempDir;

fn create_test_storage() -> (FileStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::new(temp_dir.path().join("data"));
    (storage, temp_dir)
}

#[test]
fn test_missing_file_reads_as_none() {
    let (storage, _temp) = create_test_storage();
    assert_eq!(storage.get("custom_tokens_data").unwrap(), None);
}

#[test]
fn test_set_creates_directory_and_file() {
    let (storage, _temp) = create_test_storage();

    storage.set("custom_tokens_data", "{}").unwrap();

    let path = storage.data_dir().join("custom_tokens_data.json");
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
}

#[test]
fn test_set_then_get_round_trips_and_leaves_no_temp_file() {
    let (storage, _temp) = create_test_storage();

    storage.set("k", r#"{"A":{"label":"Ay","value":"1"}}"#).unwrap();
    storage.set("k", r#"{"B":{"label":"Bee","value":"2"}}"#).unwrap();

    assert_eq!(
        storage.get("k").unwrap().as_deref(),
        Some(r#"{"B":{"label":"Bee","value":"2"}}"#)
    );
    assert!(!storage.data_dir().join("k.tmp").exists());
}

#[test]
fn test_rejects_path_like_keys() {
    let (storage, _temp) = create_test_storage();

    assert_eq!(
        storage.set("../escape", "x"),
        Err(StorageError::InvalidKey("../escape".to_string()))
    );
    assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
}
