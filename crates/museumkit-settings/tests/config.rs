use museumkit_settings::{ConfigError, EditorConfig, SettingsError};
use tempfile::tempdir;

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.toml");

    let mut config = EditorConfig::default();
    config.history.max_size = 20;
    config.constraints.max_room_area = 400.0;
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.json");

    let mut config = EditorConfig::default();
    config.grid.vertex_snap_threshold = 0.5;
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.grid.vertex_snap_threshold, 0.5);
}

#[test]
fn test_partial_file_uses_section_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "[history]\nmax_size = 10\n").unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.history.max_size, 10);
    assert_eq!(loaded.constraints, Default::default());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "[grid]\ngrid_size = 0.0\n").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_invalid_config_not_saved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.json");

    let mut config = EditorConfig::default();
    config.view.zoom_step = 1.0;
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_missing_and_unknown_files() {
    let dir = tempdir().unwrap();
    let missing = EditorConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(missing, SettingsError::Config(ConfigError::NotFound(_))));

    let yaml = dir.path().join("editor.yaml");
    std::fs::write(&yaml, "grid: {}").unwrap();
    let unknown = EditorConfig::load_from_file(&yaml).unwrap_err();
    assert!(matches!(unknown, SettingsError::Config(ConfigError::UnsupportedFormat(_))));
}
