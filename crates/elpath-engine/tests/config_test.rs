use elpath_engine::config::{ConfigError, ConfigLoader};
use elpath_engine::definitions::{DefinitionLoadError, DefinitionLoader};
use elpath_engine::{FanOut, ResolverOptions, Selector};
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elpath.yaml");
    std::fs::write(
        &path,
        r#"
webdriver_url: http://localhost:4444
root_selector: body
definitions: page.yaml
fan_out: sequential
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from(&path).await.unwrap();
    assert_eq!(config.webdriver_url.as_deref(), Some("http://localhost:4444"));
    assert_eq!(config.root_selector, "body");
    assert_eq!(config.fan_out, FanOut::Sequential);
    // Relative to the config file, not the working directory.
    assert_eq!(config.definitions, Some(dir.path().join("page.yaml")));

    let options = ResolverOptions::from_config(&config);
    assert_eq!(options.root, Selector::css("body"));
    assert_eq!(options.fan_out, FanOut::Sequential);
}

#[tokio::test]
async fn test_config_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "webdriver_url: http://localhost:9515").unwrap();

    let config = ConfigLoader::load_from(file.path()).await.unwrap();
    assert_eq!(config.root_selector, "html");
    assert_eq!(config.fan_out, FanOut::Concurrent);
    assert!(config.definitions.is_none());
}

#[tokio::test]
async fn test_config_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fan_out: sideways").unwrap();

    let err = ConfigLoader::load_from(file.path()).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigLoader::load_from(&dir.path().join("missing.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[tokio::test]
async fn test_load_definitions_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
definitions:
  - alias: collection
    selector: ol > li
    collection: true
  - alias: heading
    selector: //h1
    selector_type: xpath
"#
    )
    .unwrap();

    let registry = DefinitionLoader::load_from(file.path()).await.unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get("heading").unwrap().selector,
        Selector::xpath("//h1")
    );
}

#[tokio::test]
async fn test_load_definitions_bad_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "definitions: [alias: x").unwrap();

    let err = DefinitionLoader::load_from(file.path()).await.unwrap_err();
    assert!(matches!(err, DefinitionLoadError::Yaml(_)));
}
