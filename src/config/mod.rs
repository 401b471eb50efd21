//! Configuration resolution
//!
//! Builds one immutable configuration context from defaults, the config
//! file, `OPENSDK_*` environment variables and command-line flags, in that
//! order of increasing precedence.

pub mod loader;
pub mod resolver;
pub mod settings;
pub mod store;

use serde_json::Value;
use std::collections::BTreeMap;

pub use loader::{load_file, write_key, ConfigFormat};
pub use resolver::{load_config, ConfigLocation, ConfigResolver, LoadedConfig};
pub use settings::{defaults, flag_contains, Settings};
pub use store::{value_to_string, ConfigPipeline, ResolvedConfig, Source};

use crate::env::{scan_environment, EnvBindings, Environment};
use crate::error::Result;
use settings::{OPT_CONFIG_FILE, OPT_PROFILE};

/// Keys that select the config file and so cannot be set from inside it.
const LOCATION_KEYS: [&str; 2] = [OPT_CONFIG_FILE, OPT_PROFILE];

/// Everything a command handler knows about its configuration.
///
/// The resolved values are not validated here; handlers that need typed
/// values call [`ConfigContext::settings`].
#[derive(Debug, Clone)]
pub struct ConfigContext {
    pub location: ConfigLocation,
    pub loaded: LoadedConfig,
    pub bindings: EnvBindings,
    pub config: ResolvedConfig,
}

impl ConfigContext {
    /// Validate the resolved configuration.
    pub fn settings(&self) -> Result<Settings> {
        Settings::from_config(&self.config)
    }
}

/// Load the file at `location` and merge it with the environment and the
/// explicitly given flags.
pub fn build_context(
    env: &Environment,
    location: ConfigLocation,
    flags: BTreeMap<String, Value>,
) -> Result<ConfigContext> {
    let bindings = scan_environment(env);
    let loaded = load_config(&location)?;

    let mut file_values = loaded.values.clone();
    for key in LOCATION_KEYS {
        if file_values.remove(key).is_some() {
            tracing::warn!(key, "ignoring key in config file; set it by flag or environment");
        }
    }

    let mut base = defaults();
    base.insert(OPT_PROFILE.to_string(), Value::from(location.profile.as_str()));

    let config = ConfigPipeline::new()
        .defaults(base)
        .file(file_values)
        .env(&bindings)
        .flags(flags)
        .resolve();

    Ok(ConfigContext { location, loaded, bindings, config })
}
