use ua_client_config::config::{MOTD_CACHE_FILE, MOTD_ESM_CACHE_FILE};
use ua_client_config::{get_version, logging, CacheEntry, CacheStore, GitDescribe};

fn main() -> Result<(), ua_client_config::Error> {
    let mut store = CacheStore::from_env()?;
    logging::init(store.config());

    let config = store.config();
    println!("sso_auth_url: {}", config.sso_auth_url());
    println!("service_url:  {}", config.service_url());
    println!("data_dir:     {}", config.data_dir().display());
    println!("log_level:    {}", config.log_level_name());
    for (key, value) in config.as_mapping() {
        if !matches!(key.as_str(), "sso_auth_url" | "service_url" | "data_dir" | "log_level") {
            println!("{key}: {value}");
        }
    }
    println!("motd caches:  {MOTD_CACHE_FILE}, {MOTD_ESM_CACHE_FILE}");

    println!("version:      {}", get_version(&GitDescribe::for_source_tree()));
    println!("attached:     {}", store.is_attached());
    match store.machine_token() {
        Some(token) => {
            if let Some(json) = token.as_json() {
                println!("machine token keys: {}", describe_keys(json));
            } else if let Some(text) = token.as_text() {
                println!("machine token is plain text ({} bytes)", text.len());
            }
        }
        None => println!("no machine token cached"),
    }
    for (name, payload) in store.entitlements() {
        let state = payload.as_ref().map_or("missing", |entry: &CacheEntry| {
            if entry.is_truthy() {
                "cached"
            } else {
                "empty"
            }
        });
        println!("entitlement {name}: {state}");
    }

    Ok(())
}

fn describe_keys(value: &serde_json::Value) -> String {
    match value.as_object() {
        Some(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
        None => "(not an object)".to_string(),
    }
}
