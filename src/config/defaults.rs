use serde_json::Value;

use super::source::{ConfigSource, Mapping};
use super::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "/etc/ubuntu-advantage/uaclient.conf";
pub const BASE_AUTH_URL: &str = "https://login.ubuntu.com";
pub const BASE_SERVICE_URL: &str = "https://uaservice.canonical.com";
pub const DEFAULT_DATA_DIR: &str = "/var/lib/ubuntu-advantage";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Status caches rendered into the message of the day.
pub const CACHE_DIR: &str = "/var/cache/ubuntu-advantage-tools/";
pub const MOTD_CACHE_FILE: &str = "/var/cache/ubuntu-advantage-tools/motd-ubuntu-advantage-status.cache";
pub const MOTD_ESM_CACHE_FILE: &str = "/var/cache/ubuntu-advantage-tools/motd-esm-status.cache";

/// Prefix for override variables, e.g. `UA_SERVICE_URL`.
pub const ENV_PREFIX: &str = "UA_";
/// Variable naming an alternative config file.
pub const CONFIG_FILE_ENV: &str = "UA_CONFIG_FILE";

/// Keys every resolved configuration carries.
pub const REQUIRED_KEYS: [&str; 4] = ["sso_auth_url", "service_url", "data_dir", "log_level"];

/// The built-in base layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl ConfigSource for Defaults {
    fn entries(&self) -> Result<Mapping, ConfigError> {
        Ok(default_mapping())
    }
}

pub fn default_mapping() -> Mapping {
    let mut map = Mapping::new();
    map.insert("sso_auth_url".into(), Value::from(BASE_AUTH_URL));
    map.insert("service_url".into(), Value::from(BASE_SERVICE_URL));
    map.insert("data_dir".into(), Value::from(DEFAULT_DATA_DIR));
    map.insert("log_level".into(), Value::from(DEFAULT_LOG_LEVEL));
    map
}
