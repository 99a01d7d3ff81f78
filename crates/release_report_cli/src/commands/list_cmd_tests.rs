use super::*;
use std::collections::BTreeMap;

fn config() -> AppConfig {
    let mut folders = BTreeMap::new();
    folders.insert("folder1".to_string(), "folder1/scripts".to_string());
    folders.insert("de/noncost".to_string(), "de/noncost/scripts".to_string());

    AppConfig {
        releases: vec!["1.2.0".to_string(), "1.0.0".to_string()],
        folders,
        ..AppConfig::default()
    }
}

#[test]
fn test_render_releases_keeps_configured_order() {
    assert_eq!(render_releases(&config()), "1.2.0\n1.0.0\n");
}

#[test]
fn test_render_folders_sorted_and_aligned() {
    assert_eq!(
        render_folders(&config()),
        "de/noncost  de/noncost/scripts\nfolder1     folder1/scripts\n"
    );
}

#[test]
fn test_render_with_nothing_configured() {
    let config = AppConfig {
        releases: vec![],
        folders: BTreeMap::new(),
        ..AppConfig::default()
    };

    assert_eq!(render_releases(&config), "");
    assert_eq!(render_folders(&config), "");
}

#[test]
fn test_execute_releases_missing_config() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("missing.toml");

    let result = execute_releases(path.to_str());

    assert!(matches!(result, Err(Error::Config(_))));
}
