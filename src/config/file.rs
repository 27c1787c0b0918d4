//! File-based configuration source.

use std::path::{Path, PathBuf};

use super::source::{ConfigSource, Mapping};
use super::ConfigError;

/// A configuration source that loads a YAML mapping from disk.
///
/// A missing file contributes nothing. A file that exists but is not a
/// YAML mapping is a hard error.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigSource for FileSource {
    fn entries(&self) -> Result<Mapping, ConfigError> {
        Ok(load_config_file(&self.path)?.unwrap_or_default())
    }
}

/// Picks the config file to load.
///
/// Precedence, highest first: `env_override`, a file named like the
/// default in `working_dir`, then `explicit` (or `default` when absent).
pub fn locate_config_file(
    explicit: Option<&Path>,
    default: &Path,
    working_dir: &Path,
    env_override: Option<&str>,
) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let candidate = explicit.unwrap_or(default);
    if let Some(name) = candidate.file_name() {
        let local = working_dir.join(name);
        if local.exists() {
            return local;
        }
    }
    candidate.to_path_buf()
}

/// Loads and parses a YAML config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
fn load_config_file(path: &Path) -> Result<Option<Mapping>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if is_blank_document(&contents) {
        return Ok(Some(Mapping::new()));
    }

    let parse_error = |source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    };
    let document: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(parse_error)?;
    if document.is_null() {
        return Ok(Some(Mapping::new()));
    }
    let table = serde_yaml::from_value(document).map_err(parse_error)?;
    Ok(Some(table))
}

fn is_blank_document(contents: &str) -> bool {
    contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}
