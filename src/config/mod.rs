//! Layered configuration: defaults, YAML file, `UA_*` environment.

mod builder;
mod defaults;
mod env;
mod error;
mod file;
mod level;
mod resolved;
mod source;

pub use builder::{resolve, ConfigResolver};
pub use defaults::{
    default_mapping, BASE_AUTH_URL, BASE_SERVICE_URL, CACHE_DIR, CONFIG_FILE_ENV,
    DEFAULT_CONFIG_FILE, DEFAULT_DATA_DIR, ENV_PREFIX, MOTD_CACHE_FILE, MOTD_ESM_CACHE_FILE,
};
pub use error::ConfigError;
pub use level::{LogLevel, UnknownLevel};
pub use resolved::ResolvedConfig;
pub use source::Mapping;
