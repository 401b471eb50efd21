//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::render::{render_records, OutputFormat, Record};

/// Run pre-execution checks in order, stopping at the first failure.
pub fn cmd_pre_run(checks: &[&dyn Fn() -> Result<()>]) -> Result<()> {
    for check in checks {
        check()?;
    }
    Ok(())
}

/// Copy everything from `reader` to the command output.
pub fn cmd_print(out: &mut dyn Write, reader: &mut dyn Read) -> Result<()> {
    io::copy(reader, out)?;
    Ok(())
}

/// Fail with a hint naming the flag and its environment variable when
/// `value` is unset.
pub fn require(flag: &str, value: Option<&str>) -> Result<()> {
    if value.is_none() {
        anyhow::bail!("--{} is required (or set {})", flag, crate::env::flag_to_env(flag));
    }
    Ok(())
}

/// Render `records` as `format` and write them to `output` when given,
/// otherwise to `out`.
pub fn emit(
    format: OutputFormat,
    output: Option<&Path>,
    out: &mut dyn Write,
    records: &[Record],
) -> Result<()> {
    let rendered = render_records(format, records)?;
    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed writing output file: {}", path.display())),
        None => cmd_print(out, &mut rendered.as_bytes()),
    }
}
