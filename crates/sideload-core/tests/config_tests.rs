use sideload_core::{ListPolicy, SideloadConfig, SideloadError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sideload.yaml");
    fs::write(
        &path,
        "send_related_model: false\nlist_without_associations: empty\n",
    )
    .unwrap();

    let config = SideloadConfig::from_yaml_file(&path).unwrap();

    assert!(!config.send_related_model);
    assert!(config.load_default_ok_response);
    assert_eq!(config.list_without_associations, ListPolicy::Empty);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = SideloadConfig::from_yaml_file(&temp_dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SideloadError::Io { .. }));
}

#[test]
fn test_wrong_value_type_is_invalid_config() {
    let err = SideloadConfig::from_yaml_str("send_related_model: sometimes").unwrap_err();
    assert!(matches!(err, SideloadError::InvalidConfig { .. }));
}
