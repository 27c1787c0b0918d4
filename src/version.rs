//! Client version discovery.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Version reported when nothing better is known.
pub const FALLBACK_VERSION: &str = "18.1";

const PLACEHOLDER_PREFIX: &str = "@@PACKAGED_VERSION";

/// Version stamped in by the packaging build, via `UA_PACKAGED_VERSION`.
pub const PACKAGED_VERSION: Option<&str> = option_env!("UA_PACKAGED_VERSION");

/// A best-effort way to learn the version at runtime.
pub trait VersionSource {
    fn version(&self) -> Option<String>;
}

impl<F> VersionSource for F
where
    F: Fn() -> Option<String>,
{
    fn version(&self) -> Option<String> {
        self()
    }
}

/// Asks git for a description of the checkout at `top_dir`.
#[derive(Debug, Clone)]
pub struct GitDescribe {
    top_dir: PathBuf,
}

impl GitDescribe {
    pub fn new(top_dir: impl AsRef<Path>) -> Self {
        Self {
            top_dir: top_dir.as_ref().to_path_buf(),
        }
    }

    /// Describes the checkout this crate was built from.
    pub fn for_source_tree() -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"))
    }
}

impl VersionSource for GitDescribe {
    fn version(&self) -> Option<String> {
        if !self.top_dir.join(".git").exists() {
            return None;
        }

        let output = Command::new("git")
            .args(["describe", "--abbrev=8", "--match=[0-9]*", "--long"])
            .current_dir(&self.top_dir)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!described.is_empty()).then_some(described)
            }
            Ok(output) => {
                debug!(status = %output.status, "git describe failed");
                None
            }
            Err(e) => {
                debug!(error = %e, "could not run git describe");
                None
            }
        }
    }
}

/// Returns the packaged version, else whatever `source` finds, else
/// [`FALLBACK_VERSION`].
pub fn get_version(source: &dyn VersionSource) -> String {
    pick_version(PACKAGED_VERSION, source)
}

fn pick_version(packaged: Option<&str>, source: &dyn VersionSource) -> String {
    if let Some(version) = packaged.filter(|v| !v.is_empty() && !v.starts_with(PLACEHOLDER_PREFIX)) {
        return version.to_string();
    }
    source
        .version()
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}
