use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults when `init_config`
/// has not run (tests, library use).
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration from `path` plus `ROTATOR__*`
/// environment overrides. Later calls replace the stored value.
pub fn init_config(path: &str) -> Result<Arc<StaticConfig>> {
    let loaded = Arc::new(StaticConfig::load(path)?);
    match CONFIG.get() {
        Some(current) => current.store(loaded.clone()),
        None => {
            let _ = CONFIG.set(ArcSwap::new(loaded.clone()));
        }
    }
    Ok(get_config())
}
