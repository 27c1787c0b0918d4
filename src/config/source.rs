use serde_json::{Map, Value};

use super::ConfigError;

/// Flat key/value mapping shared by every configuration layer.
pub type Mapping = Map<String, Value>;

/// One layer of the configuration pipeline.
///
/// Layers are applied in order; each returned key replaces the value
/// accumulated so far. Values are never merged below the top level.
pub trait ConfigSource: std::fmt::Debug {
    fn entries(&self) -> Result<Mapping, ConfigError>;
}

/// Applies `overlay` on top of `base`, key by key.
pub fn merge_into(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}
