use crate::cache::CacheError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the client configuration library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}
