//! Subscriber setup driven by the resolved `log_level`.

use tracing_subscriber::EnvFilter;

use crate::config::ResolvedConfig;

/// Filter directive for the configured level; unknown names fall back to
/// `info`.
pub fn directive_for(config: &ResolvedConfig) -> &'static str {
    config
        .log_level()
        .map(|level| level.filter_directive())
        .unwrap_or("info")
}

/// Installs a global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level. Later calls are no-ops.
pub fn init(config: &ResolvedConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(config)));

    // Another subscriber may already be installed; keep it.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
