//! Command-line interface for opensdk
//!
//! Builds the command tree, resolves configuration and dispatches to the
//! selected subcommand.

use anyhow::Result;
use clap::{ArgMatches, FromArgMatches};
use std::io::Write;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{build_context, ConfigResolver};
use crate::env::Environment;

mod bar;
mod cfg;
mod completion;
mod flags;
mod foo;
mod tree;
mod utils;
mod version;

pub use flags::{bindable_flag_names, ApiArgs, GlobalArgs};
pub use tree::{cmd_root, init_cmd, with_cmd, with_flags_global, CmdOption, CMD_NAME};
pub use utils::{cmd_pre_run, cmd_print};

pub fn run() -> Result<()> {
    let matches = cmd_root().get_matches();
    let global = GlobalArgs::from_arg_matches(&matches)?;

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let env = Environment::from_process();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(&matches, &env, &mut out)
}

/// Resolve configuration for `matches` and run the selected subcommand.
///
/// The first error stops execution and is returned unchanged.
pub fn dispatch(matches: &ArgMatches, env: &Environment, out: &mut dyn Write) -> Result<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        anyhow::bail!("no command given; run `{} --help`", CMD_NAME);
    };

    // Completion scripts never depend on configuration.
    if name == "completion" {
        return completion::run(completion::CompletionArgs::from_arg_matches(sub_matches)?, out);
    }

    let global = GlobalArgs::from_arg_matches(matches)?;
    let location = ConfigResolver::new(env)
        .config_file_flag(global.config_file.clone())
        .profile_flag(global.profile.clone())
        .resolve();
    // Flags given on the command line are bound last so they always win.
    let ctx = build_context(env, location, global.bindings()?)?;
    tracing::debug!(command = name, profile = %ctx.location.profile, "dispatching");

    match name {
        "foo" => foo::run(foo::FooArgs::from_arg_matches(sub_matches)?, &ctx, out),
        "bar" => bar::run(bar::BarArgs::from_arg_matches(sub_matches)?, &ctx, out),
        "cfg" => cfg::run(cfg::CfgArgs::from_arg_matches(sub_matches)?, &ctx, out),
        "version" => version::run(&ctx, out),
        other => anyhow::bail!("unknown command: {}", other),
    }
}
