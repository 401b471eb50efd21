//! Config file location and loading.
//!
//! The file is chosen once per invocation:
//! `--config-file` > `OPENSDK_CONFIG_FILE` > search for `<profile>.<ext>` in the
//! user config directory, then the system directory.

use std::path::{Path, PathBuf};

use super::loader::{self, FileValues, SUPPORTED_EXTENSIONS};
use crate::env::Environment;
use crate::error::{Error, Result};

pub const APP_NAME: &str = "opensdk";
pub const DEFAULT_PROFILE: &str = "main";
pub const ENV_CONFIG_FILE: &str = "OPENSDK_CONFIG_FILE";
pub const ENV_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
pub const ENV_PROFILE: &str = "OPENSDK_PROFILE";
pub const SYSTEM_CONFIG_DIR: &str = "/etc/opensdk";

/// Inputs to config file resolution.
#[derive(Debug, Clone)]
pub struct ConfigResolver<'a> {
    env: &'a Environment,
    config_file_flag: Option<PathBuf>,
    profile_flag: Option<String>,
    user_config_dir: Option<PathBuf>,
    system_dir: PathBuf,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self {
            env,
            config_file_flag: None,
            profile_flag: None,
            user_config_dir: dirs::config_dir(),
            system_dir: PathBuf::from(SYSTEM_CONFIG_DIR),
        }
    }

    pub fn config_file_flag(mut self, path: Option<PathBuf>) -> Self {
        self.config_file_flag = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn profile_flag(mut self, profile: Option<String>) -> Self {
        self.profile_flag = profile.filter(|p| !p.is_empty());
        self
    }

    /// OS configuration directory used when `XDG_CONFIG_HOME` is unset.
    pub fn user_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_config_dir = dir;
        self
    }

    pub fn system_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_dir = dir.into();
        self
    }

    pub fn resolve(&self) -> ConfigLocation {
        let explicit = self
            .config_file_flag
            .clone()
            .or_else(|| self.env.var(ENV_CONFIG_FILE).map(PathBuf::from));

        let config_dir = self
            .env
            .var(ENV_CONFIG_HOME)
            .map(PathBuf::from)
            .or_else(|| self.user_config_dir.clone())
            .map(|home| home.join(APP_NAME));

        let profile = self
            .profile_flag
            .clone()
            .or_else(|| self.env.var(ENV_PROFILE).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let search_dirs = if explicit.is_some() {
            Vec::new()
        } else {
            config_dir.iter().cloned().chain(std::iter::once(self.system_dir.clone())).collect()
        };

        tracing::debug!(?explicit, ?config_dir, %profile, "resolved config location");
        ConfigLocation { explicit, config_dir, search_dirs, profile }
    }
}

/// Where the config file is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// File named by flag or environment; disables searching.
    pub explicit: Option<PathBuf>,
    /// `<config home>/opensdk`, when a config home is known.
    pub config_dir: Option<PathBuf>,
    /// Directories searched for `<profile>.<ext>`, in order.
    pub search_dirs: Vec<PathBuf>,
    pub profile: String,
}

impl ConfigLocation {
    /// Candidate files in search order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match &self.explicit {
            Some(path) => vec![path.clone()],
            None => {
                let mut candidates = Vec::new();
                for dir in &self.search_dirs {
                    for ext in SUPPORTED_EXTENSIONS {
                        candidates.push(dir.join(format!("{}.{}", self.profile, ext)));
                    }
                }
                candidates
            }
        }
    }

    /// File that `cfg set` writes to.
    pub fn write_target(&self, loaded: &LoadedConfig) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Some(path) = &loaded.path {
            return Ok(path.clone());
        }
        self.config_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.toml", self.profile)))
            .ok_or(Error::NoConfigDir)
    }
}

/// Result of reading the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    /// File the values were read from; `None` when nothing was loaded.
    pub path: Option<PathBuf>,
    pub values: FileValues,
}

/// Read the config file for `location`.
///
/// A missing file is never an error. Other failures on an explicit file are
/// returned; on a discovered file they are logged as warnings and the file
/// is skipped.
pub fn load_config(location: &ConfigLocation) -> Result<LoadedConfig> {
    if let Some(path) = &location.explicit {
        return match loader::load_file(path) {
            Ok(values) => Ok(loaded(path, values)),
            Err(e) if e.is_not_found() => {
                tracing::warn!("Config file {} not found, continuing without it", path.display());
                Ok(LoadedConfig::default())
            }
            Err(e) => Err(e),
        };
    }

    for candidate in location.candidates() {
        match loader::load_file(&candidate) {
            Ok(values) => return Ok(loaded(&candidate, values)),
            Err(e) if e.is_not_found() => continue,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", candidate.display(), e);
                return Ok(LoadedConfig::default());
            }
        }
    }

    tracing::debug!(profile = %location.profile, "no config file found");
    Ok(LoadedConfig::default())
}

fn loaded(path: &Path, values: FileValues) -> LoadedConfig {
    tracing::debug!(path = %path.display(), keys = values.len(), "loaded config file");
    LoadedConfig { path: Some(path.to_path_buf()), values }
}
