pub mod cache;
pub mod config;
mod error;
pub mod logging;
pub mod version;

pub use cache::{CacheEntry, CacheError, CacheKey, CacheStore};
pub use config::{resolve, ConfigError, ConfigResolver, LogLevel, ResolvedConfig};
pub use error::Error;
pub use version::{get_version, GitDescribe, VersionSource};
