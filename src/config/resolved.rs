use std::path::{Path, PathBuf};

use serde_json::Value;

use super::defaults::{default_mapping, REQUIRED_KEYS};
use super::level::{normalize_level, LogLevel};
use super::source::{merge_into, Mapping};
use super::ConfigError;

/// The merged configuration for one process invocation.
///
/// Every default key is present. `data_dir` is absolute with `~` expanded,
/// and `log_level` is an uppercase level name. Keys the client does not know
/// about are carried through unchanged and reachable with [`get`](Self::get).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    values: Mapping,
    sso_auth_url: String,
    service_url: String,
    data_dir: PathBuf,
    log_level: String,
}

impl ResolvedConfig {
    /// Builds a configuration from an explicit starting mapping.
    ///
    /// The mapping is layered over the defaults and normalized exactly like
    /// a resolved one; relative data directories are anchored at
    /// `working_dir`. No file or environment is consulted.
    pub fn from_mapping(mapping: Mapping, working_dir: &Path) -> Result<Self, ConfigError> {
        let mut merged = default_mapping();
        merge_into(&mut merged, mapping);
        Self::normalize(merged, working_dir)
    }

    pub(crate) fn normalize(mut values: Mapping, working_dir: &Path) -> Result<Self, ConfigError> {
        for key in REQUIRED_KEYS {
            if matches!(values.get(key), None | Some(Value::Null)) {
                return Err(ConfigError::ConfigAbsent(key.to_string()));
            }
        }

        let log_level = normalize_level(&values["log_level"])?;
        let sso_auth_url = scalar_string("sso_auth_url", &values["sso_auth_url"])?;
        let service_url = scalar_string("service_url", &values["service_url"])?;
        let raw_data_dir = scalar_string("data_dir", &values["data_dir"])?;
        let data_dir = absolute_data_dir(&raw_data_dir, working_dir)?;

        values.insert("log_level".into(), Value::from(log_level.clone()));
        values.insert("sso_auth_url".into(), Value::from(sso_auth_url.clone()));
        values.insert("service_url".into(), Value::from(service_url.clone()));
        values.insert(
            "data_dir".into(),
            Value::from(data_dir.to_string_lossy().into_owned()),
        );

        Ok(Self {
            values,
            sso_auth_url,
            service_url,
            data_dir,
            log_level,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value for `key` when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn sso_auth_url(&self) -> &str {
        &self.sso_auth_url
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Contract service endpoint, if one was configured.
    pub fn contract_url(&self) -> Option<&str> {
        self.get_str("contract_url")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The normalized level name, which may name no known level.
    pub fn log_level_name(&self) -> &str {
        &self.log_level
    }

    /// The typed level, or `None` when the configured name is not recognized.
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level.parse().ok()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.values
    }
}

/// Accepts strings, and coerces numbers and booleans to their text form.
fn scalar_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(ConfigError::ConfigAbsent(key.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "expected a scalar value".to_string(),
        }),
    }
}

fn absolute_data_dir(raw: &str, working_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_user(raw)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(working_dir.join(expanded))
    }
}

/// Expands a leading `~` to the current user's home directory.
///
/// Other users' homes (`~name`) are not looked up and are rejected, as is
/// `~` when no home directory is known.
fn expand_user(raw: &str) -> Result<PathBuf, ConfigError> {
    let Some(rest) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };

    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: "data_dir".to_string(),
        reason: format!("{reason} in '{raw}'"),
    };

    if !(rest.is_empty() || rest.starts_with('/')) {
        return Err(invalid("cannot expand another user's home directory"));
    }

    match dirs::home_dir() {
        Some(home) => Ok(home.join(rest.trim_start_matches('/'))),
        None => Err(invalid("no home directory is known")),
    }
}
