use crate::app::load_config;

use std::fs;

use tempfile::TempDir;

#[test]
fn given_server_flag_when_loading_config_then_overrides_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[api]\nbase_url = \"http://127.0.0.1:9000\"\n",
    )
    .unwrap();

    let config = load_config(dir.path(), Some("http://10.0.0.5:8080")).unwrap();

    assert_eq!(config.api.base_url, "http://10.0.0.5:8080");
}

#[test]
fn given_invalid_server_flag_when_loading_config_then_rejected() {
    let dir = TempDir::new().unwrap();

    assert!(load_config(dir.path(), Some("ftp://example.com")).is_err());
}
