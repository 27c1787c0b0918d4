//! File-per-key cache under the configured data directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::entry::CacheEntry;
use super::keys::{file_name_for, CacheKey};
use super::CacheError;
use crate::config::{self, ConfigError, Mapping, ResolvedConfig};

/// Reads and writes cache entries for one resolved configuration.
///
/// `contracts`, `entitlements` and `machine_token` are memoized on the
/// instance once they read back non-empty. Nothing invalidates them; build a
/// new store to observe later on-disk changes.
#[derive(Debug)]
pub struct CacheStore {
    config: ResolvedConfig,
    contracts: Vec<Value>,
    entitlements: BTreeMap<String, Option<CacheEntry>>,
    machine_token: Option<CacheEntry>,
}

impl CacheStore {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            contracts: Vec::new(),
            entitlements: BTreeMap::new(),
            machine_token: None,
        }
    }

    /// Resolves the configuration from the process environment first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(config::resolve(None)?))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Path of the file backing `key`, or the data directory itself for an
    /// empty key.
    pub fn data_path(&self, key: impl AsRef<str>) -> PathBuf {
        let key = key.as_ref();
        let data_dir = self.config.data_dir();
        if key.is_empty() {
            return data_dir.to_path_buf();
        }
        data_dir.join(file_name_for(key))
    }

    /// Returns the cached entry, or `None` when no file exists for `key`.
    pub fn read_cache(&self, key: impl AsRef<str>) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.data_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(CacheEntry::from_contents(contents))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "cache file does not exist");
                Ok(None)
            }
            Err(e) => Err(CacheError::Read { path, source: e }),
        }
    }

    /// Replaces the file for `key` with `content`, creating the data
    /// directory when needed. The write is not atomic.
    pub fn write_cache(
        &self,
        key: impl AsRef<str>,
        content: impl Into<CacheEntry>,
    ) -> Result<(), CacheError> {
        let data_dir = self.config.data_dir();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| CacheError::CreateDir {
                path: data_dir.to_path_buf(),
                source: e,
            })?;
        }

        let path = self.data_path(key);
        let contents = content.into().to_contents()?;
        fs::write(&path, contents).map_err(|e| CacheError::Write { path, source: e })
    }

    /// Serializes `value` as JSON and writes it like [`write_cache`](Self::write_cache).
    pub fn write_cache_value<T: Serialize + ?Sized>(
        &self,
        key: impl AsRef<str>,
        value: &T,
    ) -> Result<(), CacheError> {
        self.write_cache(key, serde_json::to_value(value)?)
    }

    /// Accounts available to the authenticated user.
    pub fn accounts(&self) -> Vec<Value> {
        json_list(self.read_or_warn(CacheKey::Accounts))
    }

    /// Contracts that apply to the account.
    pub fn contracts(&mut self) -> &[Value] {
        if self.contracts.is_empty() {
            self.contracts = json_list(self.read_or_warn(CacheKey::AccountContracts));
        }
        &self.contracts
    }

    /// Cached machine-access payload for every entitlement the contracts grant.
    pub fn entitlements(&mut self) -> &BTreeMap<String, Option<CacheEntry>> {
        if !self.entitlements.is_empty() {
            return &self.entitlements;
        }

        let names: Vec<String> = self
            .contracts()
            .iter()
            .flat_map(entitlement_names)
            .collect();

        let mut entitlements = BTreeMap::new();
        for name in names {
            let payload = self.read_or_warn(format!("machine-access-{name}"));
            entitlements.insert(name, payload);
        }
        self.entitlements = entitlements;
        &self.entitlements
    }

    pub fn machine_token(&mut self) -> Option<&CacheEntry> {
        if !self.machine_token.as_ref().is_some_and(CacheEntry::is_truthy) {
            self.machine_token = self.read_or_warn(CacheKey::MachineToken);
        }
        self.machine_token.as_ref()
    }

    /// Whether a non-empty machine token is cached. Detaching removes it.
    pub fn is_attached(&mut self) -> bool {
        self.machine_token().is_some_and(CacheEntry::is_truthy)
    }

    fn read_or_warn(&self, key: impl AsRef<str>) -> Option<CacheEntry> {
        let key = key.as_ref();
        match self.read_cache(key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = key, error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractSummary {
    contract_info: ContractInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractInfo {
    #[serde(default)]
    resource_entitlements: Mapping,
}

fn entitlement_names(contract: &Value) -> Vec<String> {
    match ContractSummary::deserialize(contract) {
        Ok(summary) => summary
            .contract_info
            .resource_entitlements
            .into_iter()
            .map(|(name, _)| name)
            .collect(),
        Err(e) => {
            debug!(error = %e, "skipping contract without resource entitlements");
            Vec::new()
        }
    }
}

fn json_list(entry: Option<CacheEntry>) -> Vec<Value> {
    match entry {
        Some(CacheEntry::Json(Value::Array(items))) => items,
        _ => Vec::new(),
    }
}
