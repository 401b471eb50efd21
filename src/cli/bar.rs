//! `bar`: show the record a write request would send.

use anyhow::{Context, Result};
use clap::{Args, Command};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::utils::{cmd_pre_run, cmd_print, emit, require};
use crate::config::settings::OPT_ACCESS_TOKEN;
use crate::config::{ConfigContext, ConfigFormat};
use crate::render::{OutputFormat, Record};

#[derive(Args, Debug, Default)]
pub struct BarArgs {}

pub fn command() -> Command {
    BarArgs::augment_args(
        Command::new("bar").about("Show the record a write request would send"),
    )
}

pub fn run(_args: BarArgs, ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let settings = ctx.settings()?;
    cmd_pre_run(&[
        &|| require(OPT_ACCESS_TOKEN, settings.access_token.as_deref()),
        &|| {
            if settings.record_id.is_none() && settings.from_file.is_none() {
                anyhow::bail!("either --record-id or --from-file is required");
            }
            Ok(())
        },
    ])?;

    let record = Record::new()
        .field("record-id", settings.record_id.clone())
        .field("account", settings.account.clone())
        .field("collaborator-id", settings.collaborator_id.clone());

    let Some(path) = &settings.from_file else {
        return emit(settings.format, settings.output.as_deref(), out, &[record]);
    };

    // Plain text echoes the body exactly as written.
    if settings.format == OutputFormat::Text && settings.output.is_none() {
        emit(settings.format, settings.output.as_deref(), out, &[record])?;
        writeln!(out)?;
        let mut file = File::open(path)
            .with_context(|| format!("Failed opening request body: {}", path.display()))?;
        return cmd_print(out, &mut file);
    }

    let body = read_body(path)?;
    emit(settings.format, settings.output.as_deref(), out, &[record.field("body", body)])
}

/// Parse a JSON or YAML request body. Files without a recognised extension
/// are read as JSON.
fn read_body(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading request body: {}", path.display()))?;
    match ConfigFormat::from_path(path) {
        Ok(ConfigFormat::Yaml) => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML request body: {}", path.display())),
        Ok(ConfigFormat::Toml) => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML request body: {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON request body: {}", path.display())),
    }
}
