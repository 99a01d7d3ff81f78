use super::*;
use serde_json::{from_str, to_string};

#[test]
fn test_item_record_deserialization() {
    let json_str = r#"{
        "objectId": "61a86fdaa79e5c6f5fb6e4026508489feb6ed92c",
        "gitObjectType": "blob",
        "commitId": "23d0bc5b128a10056dc68afece360d8a0fabb014",
        "path": "/db/scripts/V1.0.0.1.sql",
        "url": "https://dev.azure.com/contoso/_apis/git/repositories/db/items?path=%2Fdb%2Fscripts%2FV1.0.0.1.sql"
    }"#;

    let record: ItemRecord = from_str(json_str).expect("Failed to deserialize ItemRecord");

    assert_eq!(record.path, "/db/scripts/V1.0.0.1.sql");
    assert!(record.url.starts_with("https://dev.azure.com/contoso/_apis/git"));
    assert!(!record.is_folder);
}

#[test]
fn test_item_record_folder_deserialization() {
    let json_str = r#"{
        "path": "/db/scripts",
        "url": "https://dev.azure.com/contoso/_apis/git/repositories/db/items?path=%2Fdb%2Fscripts",
        "isFolder": true
    }"#;

    let record: ItemRecord = from_str(json_str).expect("Failed to deserialize ItemRecord");

    assert!(record.is_folder);
}

#[test]
fn test_item_record_missing_fields_default() {
    let record: ItemRecord = from_str("{}").expect("Failed to deserialize empty ItemRecord");

    assert_eq!(record.path, "");
    assert_eq!(record.url, "");
    assert!(!record.is_folder);
}

#[test]
fn test_file_entry_new_derives_name() {
    let entry = FileEntry::new(
        "/db/scripts/V1.29.0.2.sql",
        "https://api/item",
        false,
        "https://web/item",
    );

    assert_eq!(entry.name, "V1.29.0.2.sql");
    assert_eq!(entry.path, "/db/scripts/V1.29.0.2.sql");
    assert_eq!(entry.remote_uri, "https://api/item");
    assert_eq!(entry.web_url, "https://web/item");
    assert!(!entry.is_folder);
    assert!(entry.added_by.is_empty());
    assert!(entry.added_date.is_empty());
    assert!(entry.updated_by.is_empty());
    assert!(entry.updated_date.is_empty());
    assert!(!entry.has_history());
}

#[test]
fn test_leaf_name() {
    assert_eq!(leaf_name("/db/scripts/V1.0.0.1.sql"), "V1.0.0.1.sql");
    assert_eq!(leaf_name("V1.0.0.1.sql"), "V1.0.0.1.sql");
    assert_eq!(leaf_name("folder1/"), "folder1");
    assert_eq!(leaf_name("/"), "");
}

#[test]
fn test_file_entry_serialization() {
    let mut entry = FileEntry::new("/db/V1.0.0.1.sql", "api", false, "web");
    entry.added_by = "Ada Lovelace".to_string();
    entry.added_date = "2024-02-14".to_string();

    let json_str = to_string(&entry).expect("Failed to serialize FileEntry");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Failed to parse JSON");

    assert_eq!(parsed["name"], "V1.0.0.1.sql");
    assert_eq!(parsed["added_by"], "Ada Lovelace");
    assert_eq!(parsed["added_date"], "2024-02-14");
    assert_eq!(parsed["updated_by"], "");
    assert_eq!(parsed["is_folder"], false);
}
