//! Typed view of the resolved configuration.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::resolver::DEFAULT_PROFILE;
use super::store::ResolvedConfig;
use crate::error::{Error, Result};
use crate::render::OutputFormat;

pub const OPT_ACCESS_TOKEN: &str = "access-token";
pub const OPT_ACCOUNT: &str = "account";
pub const OPT_BASE_URL: &str = "base-url";
pub const OPT_COLLABORATOR_ID: &str = "collaborator-id";
pub const OPT_CONFIG_FILE: &str = "config-file";
pub const OPT_CONFIRM: &str = "confirm";
pub const OPT_DOMAIN: &str = "domain";
pub const OPT_FORMAT: &str = "format";
pub const OPT_FROM_FILE: &str = "from-file";
pub const OPT_NO_INTERACTIVE: &str = "no-interactive";
pub const OPT_OUTPUT: &str = "output";
pub const OPT_PAGE: &str = "page";
pub const OPT_PER_PAGE: &str = "per-page";
pub const OPT_PROFILE: &str = "profile";
pub const OPT_QUERY: &str = "query";
pub const OPT_RECORD_ID: &str = "record-id";
pub const OPT_SANDBOX: &str = "sandbox";

pub const DEFAULT_FORMAT: &str = "text";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Lowest-priority layer of the configuration.
pub fn defaults() -> BTreeMap<String, Value> {
    [
        (OPT_PROFILE, Value::from(DEFAULT_PROFILE)),
        (OPT_FORMAT, Value::from(DEFAULT_FORMAT)),
        (OPT_SANDBOX, Value::Bool(false)),
        (OPT_NO_INTERACTIVE, Value::Bool(false)),
        (OPT_CONFIRM, Value::Bool(false)),
        (OPT_PAGE, Value::from(DEFAULT_PAGE)),
        (OPT_PER_PAGE, Value::from(DEFAULT_PER_PAGE)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Fail unless the resolved value of `flag` is one of `values`.
pub fn flag_contains(config: &ResolvedConfig, flag: &str, values: &[&str]) -> Result<()> {
    let flag_value = config.get_string(flag);
    if values.iter().any(|v| *v == flag_value) {
        return Ok(());
    }
    Err(Error::InvalidFlagValue { flag: flag.to_string(), value: flag_value })
}

/// Settings handed to command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub sandbox: bool,
    pub no_interactive: bool,
    pub confirm: bool,
    pub access_token: Option<String>,
    pub account: Option<String>,
    pub base_url: Option<String>,
    pub collaborator_id: Option<String>,
    pub domain: Option<String>,
    pub from_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub page: u32,
    pub per_page: u32,
    pub query: Option<String>,
    pub record_id: Option<String>,
}

impl Settings {
    /// Validate and convert the resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        flag_contains(config, OPT_FORMAT, &OutputFormat::NAMES)?;
        let format = config
            .get_string(OPT_FORMAT)
            .parse::<OutputFormat>()
            .map_err(|_| invalid(config, OPT_FORMAT))?;

        let page = positive(config, OPT_PAGE, DEFAULT_PAGE)?;
        let per_page = positive(config, OPT_PER_PAGE, DEFAULT_PER_PAGE)?;

        Ok(Self {
            format,
            sandbox: config.get_bool(OPT_SANDBOX)?,
            no_interactive: config.get_bool(OPT_NO_INTERACTIVE)?,
            confirm: config.get_bool(OPT_CONFIRM)?,
            access_token: config.get_opt_string(OPT_ACCESS_TOKEN),
            account: config.get_opt_string(OPT_ACCOUNT),
            base_url: config.get_opt_string(OPT_BASE_URL),
            collaborator_id: config.get_opt_string(OPT_COLLABORATOR_ID),
            domain: config.get_opt_string(OPT_DOMAIN),
            from_file: config.get_opt_string(OPT_FROM_FILE).map(PathBuf::from),
            output: config.get_opt_string(OPT_OUTPUT).map(PathBuf::from),
            page,
            per_page,
            query: config.get_opt_string(OPT_QUERY),
            record_id: config.get_opt_string(OPT_RECORD_ID),
        })
    }

    /// Whether the user may be prompted.
    pub fn interactive(&self) -> bool {
        !self.no_interactive
    }
}

fn positive(config: &ResolvedConfig, flag: &str, default: u32) -> Result<u32> {
    match config.get_u32(flag)? {
        None => Ok(default),
        Some(0) => Err(invalid(config, flag)),
        Some(n) => Ok(n),
    }
}

fn invalid(config: &ResolvedConfig, flag: &str) -> Error {
    Error::InvalidFlagValue { flag: flag.to_string(), value: config.get_string(flag) }
}
