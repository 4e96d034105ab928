use betfair_ng::config::{Config, CONFIG_FILE};
use betfair_ng::{Endpoints, Kind};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_new_with_valid_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE);

    let config_content = r#"
[client]
certificate_path = "/certs/client-2048.crt"
key_path = "/certs/client-2048.key"
application_key = "test_key"

[credentials]
username = "test_user"
password = "test_pass"
"#;

    fs::write(&config_path, config_content).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = Config::new();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.client.certificate_path, "/certs/client-2048.crt");
    assert_eq!(config.client.key_path, "/certs/client-2048.key");
    assert_eq!(config.client.application_key, "test_key");
    assert!(config.client.session_token.is_empty());

    let credentials = config.credentials.unwrap();
    assert_eq!(credentials.username, "test_user");
    assert_eq!(credentials.password, "test_pass");
    assert_eq!(config.endpoints, Endpoints::default());
}

#[test]
fn test_config_from_missing_file() {
    let dir = tempdir().unwrap();

    let err = Config::from_path(dir.path().join(CONFIG_FILE)).unwrap_err();
    assert_eq!(err.kind(), Kind::Configuration);
}

#[test]
fn test_config_with_invalid_toml() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE);

    let invalid_content = r#"
[client
application_key = "test_key"
"#;
    fs::write(&config_path, invalid_content).unwrap();

    assert!(Config::from_path(&config_path).is_err());
}

#[test]
fn test_config_rejects_unknown_client_key() {
    let err = Config::from_toml_str(
        r#"
[client]
application_key = "test_key"
pfx_password = "secret"
"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), Kind::Configuration);
    assert!(err.to_string().contains("pfx_password"));
}

#[test]
fn test_config_accepts_camel_case_keys() {
    let config = Config::from_toml_str(
        r#"
[client]
certificatePath = "c"
keyPath = "k"
applicationKey = "a"
"#,
    )
    .unwrap();
    assert_eq!(config.client.certificate_path, "c");
    assert_eq!(config.client.key_path, "k");
    assert_eq!(config.client.application_key, "a");
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert!(config.client.application_key.is_empty());
    assert!(config.credentials.is_none());
    assert_eq!(
        config.endpoints.betting,
        "https://api.betfair.com/exchange/betting/rest/v1.0/"
    );
}

#[test]
fn test_endpoint_override_keeps_other_defaults() {
    let config = Config::from_toml_str(
        r#"
[endpoints]
betting = "http://localhost:8080/betting/"
"#,
    )
    .unwrap();
    assert_eq!(config.endpoints.betting, "http://localhost:8080/betting/");
    assert_eq!(
        config.endpoints.cert_login,
        "https://identitysso-cert.betfair.com/api/certlogin"
    );

    assert!(Config::from_toml_str("[endpoints]\nstreaming = \"x\"\n").is_err());
}

#[test]
fn test_config_rejects_unknown_table() {
    let err = Config::from_toml_str(
        r#"
[clinet]
application_key = "test_key"
"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), Kind::Configuration);
    assert!(err.to_string().contains("clinet"));
}
