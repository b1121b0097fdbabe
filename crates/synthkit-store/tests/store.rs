use std::path::PathBuf;

use serde_json::json;

use synthkit_store::{
    DatasetMetadata, DatasetStore, FsDatasetStore, MemoryDatasetStore, StoreError, checksum,
    envelope,
};

fn temp_root(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}", uuid::Uuid::new_v4()))
}

fn sample() -> serde_json::Value {
    json!({
        "businessType": "checkout-ecommerce",
        "stage": "early",
        "seed": 1,
        "customers": [{"id": "cus_1"}],
    })
}

#[test]
fn fs_store_round_trips_with_checksum_sidecar() {
    let root = temp_root("synthkit_store");
    let store = FsDatasetStore::new(&root).with_base_url("https://data.example.com/datasets/");
    let id = "checkout-ecommerce--developer--early--1";

    let url = store.save(id, &sample()).expect("save dataset");
    assert_eq!(
        url,
        "https://data.example.com/datasets/checkout-ecommerce--developer--early--1.json"
    );
    assert!(store.exists(id).expect("exists"));

    let loaded = store
        .load_verified(id)
        .expect("load dataset")
        .expect("dataset present");
    assert!(loaded.checksum_ok);
    assert_eq!(loaded.data, sample());

    let metadata = store.metadata(id).expect("metadata").expect("sidecar present");
    let bytes = std::fs::read(store.data_path(id)).expect("read data file");
    assert_eq!(metadata.checksum, checksum(&bytes));
    assert_eq!(metadata.bytes, bytes.len() as u64);
    assert_eq!(metadata.business_type.as_deref(), Some("checkout-ecommerce"));
    assert_eq!(metadata.stage.as_deref(), Some("early"));
    assert_eq!(metadata.seed, Some(1));

    assert_eq!(store.list().expect("list"), vec![id.to_string()]);
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn checksum_mismatch_still_returns_data() {
    let root = temp_root("synthkit_store_mismatch");
    let store = FsDatasetStore::new(&root);
    let id = "tampered";
    store.save(id, &sample()).expect("save dataset");

    let tampered = json!({"businessType": "default"});
    std::fs::write(
        store.data_path(id),
        serde_json::to_vec(&tampered).expect("encode"),
    )
    .expect("overwrite data file");

    let loaded = store
        .load_verified(id)
        .expect("load dataset")
        .expect("dataset present");
    assert!(!loaded.checksum_ok);
    assert_eq!(loaded.data, tampered);
    assert_eq!(store.load(id).expect("load"), Some(tampered));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_datasets_load_as_none() {
    let store = FsDatasetStore::new(temp_root("synthkit_store_missing"));
    assert!(store.load("nothing-here").expect("load").is_none());
    assert!(!store.exists("nothing-here").expect("exists"));
    assert!(store.list().expect("list").is_empty());
}

#[test]
fn invalid_ids_are_rejected() {
    let store = MemoryDatasetStore::new();
    let err = store.save("../escape", &sample()).expect_err("invalid id");
    assert!(matches!(err, StoreError::InvalidId(_)));

    let fs_store = FsDatasetStore::new(temp_root("synthkit_store_invalid"));
    assert!(matches!(
        fs_store.load("Has Spaces"),
        Err(StoreError::InvalidId(_))
    ));
}

#[test]
fn memory_store_keeps_metadata_and_overwrites() {
    let store = MemoryDatasetStore::new();
    let url = store
        .save_with_metadata(
            "scenario-a",
            &sample(),
            DatasetMetadata {
                business_type: Some("custom".to_string()),
                ..DatasetMetadata::default()
            },
        )
        .expect("save dataset");
    assert_eq!(url, "memory://datasets/scenario-a");

    let metadata = store
        .metadata("scenario-a")
        .expect("metadata")
        .expect("metadata present");
    assert_eq!(metadata.id, "scenario-a");
    assert_eq!(metadata.business_type.as_deref(), Some("custom"));

    store
        .save("scenario-a", &json!({"seed": 2}))
        .expect("overwrite dataset");
    let loaded = store
        .load_verified("scenario-a")
        .expect("load")
        .expect("present");
    assert!(loaded.checksum_ok);
    assert_eq!(loaded.data, json!({"seed": 2}));
    assert_eq!(store.list().expect("list"), vec!["scenario-a".to_string()]);
}

#[test]
fn envelope_wraps_payload() {
    assert_eq!(envelope(json!({"seed": 1})), json!({"data": {"seed": 1}}));
}

#[test]
fn reuse_requires_matching_request() {
    let small = json!({"counts": {"customers": 5}, "reference_time": "2024-06-01T00:00:00Z"});
    let large = json!({"counts": {"customers": 50}, "reference_time": "2024-06-01T00:00:00Z"});
    let id = "b2b-saas-subscriptions--developer--growth--42";

    let memory = MemoryDatasetStore::new();
    assert_eq!(memory.find_reusable(id, &small).expect("lookup"), None);
    memory
        .save_with_metadata(
            id,
            &sample(),
            DatasetMetadata::describe(&sample()).with_request(small.clone()),
        )
        .expect("save dataset");
    assert_eq!(
        memory.find_reusable(id, &small).expect("lookup"),
        Some(format!("memory://datasets/{id}"))
    );
    assert_eq!(memory.find_reusable(id, &large).expect("lookup"), None);

    memory.save(id, &sample()).expect("save without request");
    assert_eq!(memory.find_reusable(id, &small).expect("lookup"), None);

    let root = temp_root("synthkit_store_reuse");
    let fs_store = FsDatasetStore::new(&root).with_base_url("https://data.example.com");
    fs_store
        .save_with_metadata(
            id,
            &sample(),
            DatasetMetadata::describe(&sample()).with_request(large.clone()),
        )
        .expect("save dataset");
    assert_eq!(
        fs_store.find_reusable(id, &large).expect("lookup"),
        Some(format!("https://data.example.com/{id}.json"))
    );
    assert_eq!(fs_store.find_reusable(id, &small).expect("lookup"), None);
    let metadata = fs_store.metadata(id).expect("metadata").expect("sidecar present");
    assert_eq!(metadata.request, Some(large));

    std::fs::remove_file(fs_store.data_path(id)).expect("remove data file");
    assert_eq!(fs_store.find_reusable(id, &small).expect("lookup"), None);
    std::fs::remove_dir_all(&root).ok();
}
