use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_when_nothing_set() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(
        cfg,
        Config {
            port: DEFAULT_PORT,
            database_url: None,
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            sanitize_max_depth: DEFAULT_MAX_DEPTH,
            restore_on_load: false,
        }
    );
}

#[test]
fn parses_overrides() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/canvas"),
        ("DATABASE_MAX_CONNECTIONS", "12"),
        ("SANITIZE_MAX_DEPTH", "64"),
        ("RESTORE_ON_LOAD", "TRUE"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/canvas"));
    assert_eq!(cfg.database_max_connections, 12);
    assert_eq!(cfg.sanitize_max_depth, 64);
    assert!(cfg.restore_on_load);
}

#[test]
fn empty_database_url_means_memory_store() {
    let cfg = config_from(&[("DATABASE_URL", "  ")]).unwrap();
    assert!(cfg.database_url.is_none());
}

#[test]
fn invalid_port_is_an_error() {
    assert_eq!(config_from(&[("PORT", "http")]), Err(ConfigError::InvalidPort("http".into())));
    assert!(config_from(&[("PORT", "70000")]).is_err());
}

#[test]
fn invalid_bool_is_an_error() {
    let err = config_from(&[("RESTORE_ON_LOAD", "yes")]).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBool { var: "RESTORE_ON_LOAD", value: "yes".into() });
}

#[test]
fn bool_accepts_numeric_forms() {
    assert!(config_from(&[("RESTORE_ON_LOAD", "1")]).unwrap().restore_on_load);
    assert!(!config_from(&[("RESTORE_ON_LOAD", "0")]).unwrap().restore_on_load);
}

#[test]
fn malformed_tuning_values_fall_back() {
    let cfg = config_from(&[("SANITIZE_MAX_DEPTH", "deep"), ("DATABASE_MAX_CONNECTIONS", "-1")]).unwrap();
    assert_eq!(cfg.sanitize_max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(cfg.database_max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);
}
