//! Global (persistent) flags shared by every subcommand.

use clap::{Args, Command};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flags accepted before or after any subcommand.
///
/// Only flags given on the command line are `Some`; they form the highest
/// configuration layer. Defaults live in the configuration defaults, so an
/// absent flag never hides a file or environment value.
#[derive(Args, Debug, Default, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalArgs {
    /// Path to the config file (overrides OPENSDK_CONFIG_FILE)
    #[arg(long, global = true, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,

    /// Profile name, selects the config file stem [default: main]
    #[arg(long, global = true, value_name = "NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Output format: json, table, text or yaml [default: text]
    #[arg(long, global = true, value_name = "FORMAT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Use the sandbox environment
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<bool>,

    /// Never prompt for input
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_interactive: Option<bool>,

    /// Answer yes to confirmation prompts
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    #[serde(skip)]
    pub verbose: bool,

    #[command(flatten)]
    #[serde(flatten)]
    pub api: ApiArgs,
}

/// Flags describing the API request a command makes.
#[derive(Args, Debug, Default, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiArgs {
    /// API access token
    #[arg(long, global = true, value_name = "TOKEN")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Account identifier
    #[arg(long, global = true, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// API base URL
    #[arg(long, global = true, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Collaborator identifier
    #[arg(long, global = true, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator_id: Option<String>,

    /// Domain name
    #[arg(long, global = true, value_name = "DOMAIN")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Read the request body from this JSON or YAML file
    #[arg(long, global = true, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_file: Option<PathBuf>,

    /// Write command output to this file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Page number to fetch
    #[arg(long, global = true, value_name = "N")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long, global = true, value_name = "N")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Filter query
    #[arg(long, global = true, value_name = "QUERY")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Record identifier
    #[arg(long, global = true, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl GlobalArgs {
    /// The flags given on the command line, keyed by flag name.
    pub fn bindings(&self) -> anyhow::Result<BTreeMap<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => anyhow::bail!("global flags serialized to {}", other),
        }
    }
}

/// Long names of every flag that can be bound from the environment.
pub fn bindable_flag_names() -> Vec<String> {
    let cmd = GlobalArgs::augment_args(Command::new("flags"));
    cmd.get_arguments()
        .filter_map(|arg| arg.get_long())
        .filter(|name| *name != "verbose")
        .map(str::to_string)
        .collect()
}
