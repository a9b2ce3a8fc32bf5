use std::path::PathBuf;
use tempfile::TempDir;
use treequill::config::Config;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.history_limit, 10);
    assert_eq!(config.indent_size, 2);
    assert!(!config.create_backup);
    assert_eq!(config.store_path, None);
    assert_eq!(config.prompt, "> ");
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config: Config = toml::from_str("history_limit = 3").unwrap();

    assert_eq!(config.history_limit, 3);
    assert_eq!(config.indent_size, 2);
    assert!(!config.create_backup);
}

#[test]
fn test_full_toml() {
    let toml_str = r#"
        history_limit = 20
        indent_size = 4
        create_backup = true
        store_path = "/tmp/doc.json"
        prompt = "tq> "
    "#;
    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.history_limit, 20);
    assert_eq!(config.indent_size, 4);
    assert!(config.create_backup);
    assert_eq!(config.store_path, Some(PathBuf::from("/tmp/doc.json")));
    assert_eq!(config.prompt, "tq> ");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("config.toml");
    let config = Config {
        history_limit: 7,
        create_backup: true,
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_load_from_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "history_limit = \"many\"").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/treequill/config.toml"));
    }
}
