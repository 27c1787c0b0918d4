use serde_json::Value;

use super::source::{ConfigSource, Mapping};
use super::ConfigError;

/// Overrides taken from prefixed environment variables.
///
/// `UA_SERVICE_URL=...` sets the key `service_url`. Values are kept as the
/// raw strings; no type coercion happens at this layer.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Reads the process environment at [`entries`](ConfigSource::entries) time.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Uses the given variables instead of the process environment.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        match &self.vars {
            Some(vars) => vars.clone(),
            // Non-unicode variables cannot name a config key; skip them.
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Mapping, ConfigError> {
        let mut vars = self.snapshot();
        // Names that lowercase to the same key resolve by byte order: last wins.
        vars.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Mapping::new();
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(&self.prefix) {
                if key.is_empty() {
                    continue;
                }
                entries.insert(key.to_lowercase(), Value::String(value));
            }
        }

        Ok(entries)
    }
}

/// Looks up a single variable in the same place the source reads from.
pub(crate) fn lookup(vars: Option<&[(String, String)]>, name: &str) -> Option<String> {
    match vars {
        Some(vars) => vars
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone()),
        None => std::env::var(name).ok(),
    }
}
