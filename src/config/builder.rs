use std::path::{Path, PathBuf};

use tracing::debug;

use super::defaults::{Defaults, CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use super::env::{self, EnvSource};
use super::file::{locate_config_file, FileSource};
use super::resolved::ResolvedConfig;
use super::source::{merge_into, ConfigSource, Mapping};
use super::ConfigError;

/// Resolves the client configuration from its three layers.
///
/// Layers apply in increasing precedence, each replacing whole keys:
///
/// 1. built-in defaults
/// 2. the YAML config file, if one exists
/// 3. `UA_*` environment variables
///
/// The file is chosen in this order: `UA_CONFIG_FILE`, a file in the working
/// directory named like the default, then the explicit path or
/// `/etc/ubuntu-advantage/uaclient.conf`.
///
/// ## Example
///
/// ```no_run
/// use ua_client_config::ConfigResolver;
///
/// let config = ConfigResolver::new()
///     .with_config_path("/etc/ubuntu-advantage/uaclient.conf")
///     .resolve()?;
///
/// println!("caching under {}", config.data_dir().display());
/// # Ok::<(), ua_client_config::ConfigError>(())
/// ```
///
/// Tests can keep resolution hermetic by injecting the environment and the
/// working directory:
///
/// ```no_run
/// use ua_client_config::ConfigResolver;
///
/// let config = ConfigResolver::new()
///     .with_env_vars([("UA_LOG_LEVEL", "debug")])
///     .with_working_dir("/tmp")
///     .resolve()?;
///
/// assert_eq!(config.log_level_name(), "DEBUG");
/// # Ok::<(), ua_client_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "resolvers do nothing until .resolve() is called"]
pub struct ConfigResolver {
    config_path: Option<PathBuf>,
    env_vars: Option<Vec<(String, String)>>,
    working_dir: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `path` in place of the default config file location.
    ///
    /// A same-named file in the working directory and `UA_CONFIG_FILE` still
    /// take precedence.
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment with the given variables.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Replaces the process working directory.
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Loads, merges and normalizes every layer.
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(ConfigError::WorkingDir)?,
        };

        let env_override = env::lookup(self.env_vars.as_deref(), CONFIG_FILE_ENV);
        let mut path = locate_config_file(
            self.config_path.as_deref(),
            Path::new(DEFAULT_CONFIG_FILE),
            &working_dir,
            env_override.as_deref(),
        );
        if path.is_relative() {
            path = working_dir.join(path);
        }
        debug!(path = %path.display(), "using UA client configuration file");

        let file = FileSource::new(&path);
        let env_source = match self.env_vars {
            Some(vars) => EnvSource::from_vars(ENV_PREFIX, vars),
            None => EnvSource::new(ENV_PREFIX),
        };
        let sources: [&dyn ConfigSource; 3] = [&Defaults, &file, &env_source];

        let mut merged = Mapping::new();
        for source in sources {
            merge_into(&mut merged, source.entries()?);
        }

        ResolvedConfig::normalize(merged, &working_dir)
    }
}

/// Resolves against the process environment and working directory.
pub fn resolve(explicit_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let resolver = match explicit_path {
        Some(path) => ConfigResolver::new().with_config_path(path),
        None => ConfigResolver::new(),
    };
    resolver.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use serde_json::Value;
    use tempfile::tempdir;

    fn no_env() -> [(&'static str, &'static str); 0] {
        []
    }

    #[test]
    fn test_defaults_only() {
        let cwd = tempdir().unwrap();
        let config = ConfigResolver::new()
            .with_config_path(cwd.path().join("missing/uaclient.conf"))
            .with_env_vars(no_env())
            .with_working_dir(cwd.path())
            .resolve()
            .unwrap();

        assert_eq!(config.sso_auth_url(), "https://login.ubuntu.com");
        assert_eq!(config.service_url(), "https://uaservice.canonical.com");
        assert_eq!(config.data_dir(), Path::new("/var/lib/ubuntu-advantage"));
        assert_eq!(config.log_level_name(), "INFO");
        assert_eq!(config.as_mapping().len(), 4);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("custom.conf");
        std::fs::write(
            &conf,
            "service_url: https://staging.example.com\nlog_level: warning\n",
        )
        .unwrap();

        let config = ConfigResolver::new()
            .with_config_path(&conf)
            .with_env_vars(no_env())
            .with_working_dir(dir.path().join("elsewhere"))
            .resolve()
            .unwrap();

        assert_eq!(config.service_url(), "https://staging.example.com");
        assert_eq!(config.log_level(), Some(LogLevel::Warning));
        assert_eq!(config.sso_auth_url(), "https://login.ubuntu.com");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("uaclient.conf");
        std::fs::write(&conf, "service_url: https://from-file.example.com\n").unwrap();

        let config = ConfigResolver::new()
            .with_config_path(&conf)
            .with_env_vars([("UA_SERVICE_URL", "https://from-env.example.com")])
            .with_working_dir(dir.path())
            .resolve()
            .unwrap();

        assert_eq!(config.service_url(), "https://from-env.example.com");
    }

    #[test]
    fn test_config_file_env_selects_file() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("override.yaml");
        std::fs::write(&conf, "contract_url: https://contracts.example.com\n").unwrap();
        let conf_str = conf.to_string_lossy().into_owned();

        let config = ConfigResolver::new()
            .with_env_vars([("UA_CONFIG_FILE", conf_str.as_str())])
            .with_working_dir(dir.path())
            .resolve()
            .unwrap();

        assert_eq!(config.contract_url(), Some("https://contracts.example.com"));
        // The selector variable is itself an override and lands in the mapping.
        assert_eq!(config.get_str("config_file"), Some(conf_str.as_str()));
    }

    #[test]
    fn test_working_dir_copy_wins_over_explicit() {
        let dir = tempdir().unwrap();
        let etc = dir.path().join("etc");
        let cwd = dir.path().join("cwd");
        std::fs::create_dir_all(&etc).unwrap();
        std::fs::create_dir_all(&cwd).unwrap();
        std::fs::write(etc.join("uaclient.conf"), "log_level: error\n").unwrap();
        std::fs::write(cwd.join("uaclient.conf"), "log_level: debug\n").unwrap();

        let config = ConfigResolver::new()
            .with_config_path(etc.join("uaclient.conf"))
            .with_env_vars(no_env())
            .with_working_dir(&cwd)
            .resolve()
            .unwrap();

        assert_eq!(config.log_level(), Some(LogLevel::Debug));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("uaclient.conf");
        std::fs::write(&conf, "data_dir: [broken\n").unwrap();

        let result = ConfigResolver::new()
            .with_config_path(&conf)
            .with_env_vars(no_env())
            .with_working_dir(dir.path())
            .resolve();

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_nulled_default_is_config_absent() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("uaclient.conf");
        std::fs::write(&conf, "data_dir:\n").unwrap();

        let result = ConfigResolver::new()
            .with_config_path(&conf)
            .with_env_vars(no_env())
            .with_working_dir(dir.path())
            .resolve();

        assert!(matches!(result, Err(ConfigError::ConfigAbsent(key)) if key == "data_dir"));
    }

    #[test]
    fn test_env_rescues_nulled_default() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("uaclient.conf");
        std::fs::write(&conf, "data_dir:\n").unwrap();

        let config = ConfigResolver::new()
            .with_config_path(&conf)
            .with_env_vars([("UA_DATA_DIR", "/srv/ua")])
            .with_working_dir(dir.path())
            .resolve()
            .unwrap();

        assert_eq!(config.data_dir(), Path::new("/srv/ua"));
        assert_eq!(config.get("data_dir"), Some(&Value::from("/srv/ua")));
    }
}
