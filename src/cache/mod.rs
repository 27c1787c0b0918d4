//! On-disk cache of account and machine state.

mod entry;
mod error;
mod keys;
mod store;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use keys::{file_name_for, CacheKey};
pub use store::CacheStore;
