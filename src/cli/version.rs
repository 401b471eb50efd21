//! `version`: print the client version.

use anyhow::Result;
use clap::Command;
use std::io::Write;

use super::utils::emit;
use crate::config::ConfigContext;
use crate::render::{OutputFormat, Record};

pub fn command() -> Command {
    Command::new("version").about("Print version information")
}

pub fn run(ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let settings = ctx.settings()?;

    if settings.format == OutputFormat::Text && settings.output.is_none() {
        writeln!(out, "{} {}", name, version)?;
        return Ok(());
    }

    let record = Record::new().field("name", name).field("version", version);
    emit(settings.format, settings.output.as_deref(), out, &[record])
}
