//! `cfg`: inspect and edit the resolved configuration.

use anyhow::{Context, Result};
use clap::{Args, Command, Subcommand};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use super::flags::bindable_flag_names;
use super::utils::{cmd_print, emit};
use crate::config::settings::{OPT_CONFIRM, OPT_FORMAT, OPT_NO_INTERACTIVE, OPT_OUTPUT};
use crate::config::{value_to_string, write_key, ConfigContext};
use crate::env::flag_to_env;
use crate::render::{OutputFormat, Record};

#[derive(Args, Debug)]
pub struct CfgArgs {
    #[command(subcommand)]
    pub action: CfgAction,
}

#[derive(Subcommand, Debug)]
pub enum CfgAction {
    /// Show every resolved key with its value and source
    Show,

    /// Print one resolved value
    Get {
        /// Configuration key (flag name)
        key: String,
    },

    /// Write a key to the active config file
    Set {
        /// Configuration key (flag name)
        key: String,
        /// Value to store
        value: String,
    },

    /// Show which config file is used and where it is searched for
    Path,

    /// List the environment variable bound to each flag
    Env,
}

pub fn command() -> Command {
    CfgArgs::augment_args(Command::new("cfg").about("Inspect and edit configuration"))
}

/// Output options read without validating the rest of the configuration,
/// so a config file holding a bad value can still be inspected and fixed.
struct View {
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl View {
    fn new(ctx: &ConfigContext) -> Self {
        let format = ctx.config.get_string(OPT_FORMAT).parse().unwrap_or_else(|err: String| {
            tracing::warn!("{}; using text", err);
            OutputFormat::Text
        });
        let output = ctx.config.get_opt_string(OPT_OUTPUT).map(PathBuf::from);
        Self { format, output }
    }

    fn emit(&self, out: &mut dyn Write, records: &[Record]) -> Result<()> {
        emit(self.format, self.output.as_deref(), out, records)
    }
}

pub fn run(args: CfgArgs, ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    match args.action {
        CfgAction::Show => show(ctx, out),
        CfgAction::Get { key } => get(ctx, out, &key),
        CfgAction::Set { key, value } => set(ctx, out, &key, &value),
        CfgAction::Path => path(ctx, out),
        CfgAction::Env => env(ctx, out),
    }
}

fn show(ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let records: Vec<Record> = ctx
        .config
        .entries()
        .map(|(key, entry)| {
            Record::new()
                .field("key", key.as_str())
                .field("value", value_to_string(&entry.value))
                .field("source", entry.source.to_string())
        })
        .collect();
    View::new(ctx).emit(out, &records)
}

fn get(ctx: &ConfigContext, out: &mut dyn Write, key: &str) -> Result<()> {
    let key = key.to_lowercase();
    let Some(source) = ctx.config.source(&key) else {
        anyhow::bail!("configuration key \"{}\" is not set", key);
    };
    let value = ctx.config.get_string(&key);

    let view = View::new(ctx);
    if view.format == OutputFormat::Text && view.output.is_none() {
        return cmd_print(out, &mut format!("{}\n", value).as_bytes());
    }

    let record = Record::new()
        .field("key", key.as_str())
        .field("value", value)
        .field("source", source.to_string());
    view.emit(out, &[record])
}

fn set(ctx: &ConfigContext, out: &mut dyn Write, key: &str, value: &str) -> Result<()> {
    let target = ctx.location.write_target(&ctx.loaded)?;

    if !confirmed(ctx, &target, key, value)? {
        anyhow::bail!("aborted: {} was not modified", target.display());
    }

    write_key(&target, key, value)?;
    tracing::info!(key, path = %target.display(), "updated config file");
    writeln!(out, "Set {} in {}", key.to_lowercase(), target.display())?;
    Ok(())
}

fn confirmed(ctx: &ConfigContext, target: &Path, key: &str, value: &str) -> Result<bool> {
    // Unreadable values fall back to the cautious choice.
    if ctx.config.get_bool(OPT_CONFIRM).unwrap_or(false) {
        return Ok(true);
    }
    let interactive = !ctx.config.get_bool(OPT_NO_INTERACTIVE).unwrap_or(true);
    if !interactive || !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "refusing to modify {} without a prompt; pass --confirm",
            target.display()
        );
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("Set {} = {} in {}?", key, value, target.display()))
        .default(false)
        .interact()
        .context("Failed reading confirmation")
}

fn path(ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let location = &ctx.location;
    let mut records = Vec::new();

    match &location.explicit {
        Some(file) => records.push(
            Record::new().field("kind", "explicit").field("path", file.display().to_string()),
        ),
        None => {
            for candidate in location.candidates() {
                records.push(
                    Record::new()
                        .field("kind", "search")
                        .field("path", candidate.display().to_string()),
                );
            }
        }
    }

    let loaded = ctx.loaded.path.as_ref().map(|p| p.display().to_string());
    records.push(Record::new().field("kind", "loaded").field("path", loaded));
    View::new(ctx).emit(out, &records)
}

fn env(ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let records: Vec<Record> = bindable_flag_names()
        .into_iter()
        .map(|flag| {
            let bound = ctx.bindings.get(&flag).is_some();
            Record::new()
                .field("flag", flag.as_str())
                .field("env", flag_to_env(&flag))
                .field("set", bound)
        })
        .collect();
    View::new(ctx).emit(out, &records)
}
