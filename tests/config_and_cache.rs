use serde_json::json;
use tempfile::tempdir;
use ua_client_config::{CacheEntry, CacheStore, ConfigResolver, LogLevel};

#[test]
fn env_overrides_every_layer_case_insensitively() {
    let dir = tempdir().unwrap();
    let conf = dir.path().join("uaclient.conf");
    std::fs::write(
        &conf,
        "sso_auth_url: https://file.example.com\ncontract_url: https://file.example.com/c\n",
    )
    .unwrap();

    let config = ConfigResolver::new()
        .with_config_path(&conf)
        .with_env_vars([
            ("UA_SSO_AUTH_URL", "https://env.example.com"),
            ("UA_Contract_Url", "https://env.example.com/c"),
            ("UA_NEW_SETTING", "on"),
            ("PATH", "/usr/bin"),
        ])
        .with_working_dir(dir.path())
        .resolve()
        .unwrap();

    assert_eq!(config.sso_auth_url(), "https://env.example.com");
    assert_eq!(config.contract_url(), Some("https://env.example.com/c"));
    assert_eq!(config.get_str("new_setting"), Some("on"));
    assert_eq!(config.get("path"), None);
}

#[test]
fn attach_flow_against_resolved_data_dir() {
    let dir = tempdir().unwrap();
    let config = ConfigResolver::new()
        .with_config_path(dir.path().join("absent.conf"))
        .with_env_vars([("UA_DATA_DIR", "state"), ("UA_LOG_LEVEL", "debug")])
        .with_working_dir(dir.path())
        .resolve()
        .unwrap();

    assert_eq!(config.data_dir(), dir.path().join("state"));
    assert_eq!(config.log_level(), Some(LogLevel::Debug));

    let mut store = CacheStore::new(config);
    assert!(!store.is_attached());
    assert!(store.entitlements().is_empty());

    store
        .write_cache(
            "account-contracts",
            json!([{"contractInfo": {"resourceEntitlements": {"fips": {}}}}]),
        )
        .unwrap();
    store
        .write_cache("machine-access-fips", json!({"entitlement": {"type": "fips"}}))
        .unwrap();
    store
        .write_cache("machine-token", json!({"machineToken": "token"}))
        .unwrap();

    assert!(store.is_attached());
    assert_eq!(
        store.entitlements().get("fips"),
        Some(&Some(CacheEntry::Json(json!({"entitlement": {"type": "fips"}}))))
    );
    assert!(dir.path().join("state/machine-token.json").exists());
}

#[test]
fn non_json_cache_content_is_returned_as_text() {
    let dir = tempdir().unwrap();
    let config = ConfigResolver::new()
        .with_config_path(dir.path().join("absent.conf"))
        .with_env_vars([("UA_DATA_DIR", dir.path().to_string_lossy().into_owned())])
        .with_working_dir(dir.path())
        .resolve()
        .unwrap();
    let store = CacheStore::new(config);

    std::fs::write(dir.path().join("sso-oauth.json"), "{not valid json").unwrap();

    assert_eq!(
        store.read_cache("oauth").unwrap(),
        Some(CacheEntry::Text("{not valid json".into()))
    );
}
