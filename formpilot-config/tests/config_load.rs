use formpilot_config::{EmbedderConfig, FormpilotConfigLoader};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
profile_path: "profiles/ada.json"
webdriver_url: "http://localhost:4444"
headless: true
embedder:
  provider: openai
  model: "text-embedding-3-small"
  auth_token: "${OPENAI_API_KEY}"
thresholds:
  field_match: 0.55
  option_high: 0.75
  "#;
    let p = write_yaml(&tmp, "formpilot.yaml", file_yaml);

    let config = FormpilotConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.profile_path, "profiles/ada.json");
    assert_eq!(config.webdriver_url, "http://localhost:4444");
    assert!(config.headless);
    assert!(matches!(config.embedder, EmbedderConfig::Openai { .. }));
    assert_eq!(config.thresholds.field_match, 0.55);
    assert_eq!(config.thresholds.option_high, 0.75);
    // Unset sections keep their defaults.
    assert_eq!(config.thresholds.option_floor, 0.5);
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let absent = tmp.path().join("does-not-exist.yaml");

    let config = FormpilotConfigLoader::new()
        .with_optional_file(absent)
        .load()
        .expect("defaults load");

    assert_eq!(config.profile_path, "user_profile.json");
    assert_eq!(config.webdriver_url, "http://localhost:9515");
    assert!(!config.headless);
    assert!(matches!(config.embedder, EmbedderConfig::Ollama { .. }));
}
