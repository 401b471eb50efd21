//! `foo`: list resources for an account.
//!
//! Prints the request that would be sent to the API.

use anyhow::Result;
use clap::{Args, Command};
use std::io::Write;

use super::utils::{cmd_pre_run, emit, require};
use crate::config::settings::{OPT_ACCESS_TOKEN, OPT_ACCOUNT};
use crate::config::{ConfigContext, Settings};
use crate::render::Record;

pub const PROD_BASE_URL: &str = "https://api.opensdk.dev";
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.opensdk.dev";

#[derive(Args, Debug, Default)]
pub struct FooArgs {
    /// Fetch every page instead of only --page
    #[arg(long)]
    pub all: bool,
}

pub fn command() -> Command {
    FooArgs::augment_args(Command::new("foo").about("List resources for an account"))
}

/// `--base-url` when set, otherwise the production or sandbox endpoint.
pub fn endpoint(settings: &Settings) -> &str {
    match (&settings.base_url, settings.sandbox) {
        (Some(url), _) => url.as_str(),
        (None, true) => SANDBOX_BASE_URL,
        (None, false) => PROD_BASE_URL,
    }
}

pub fn run(args: FooArgs, ctx: &ConfigContext, out: &mut dyn Write) -> Result<()> {
    let settings = ctx.settings()?;
    cmd_pre_run(&[
        &|| require(OPT_ACCESS_TOKEN, settings.access_token.as_deref()),
        &|| require(OPT_ACCOUNT, settings.account.as_deref()),
    ])?;

    let record = Record::new()
        .field("endpoint", endpoint(&settings))
        .field("account", settings.account.clone())
        .field("domain", settings.domain.clone())
        .field("query", settings.query.clone())
        .field("page", if args.all { None } else { Some(settings.page) })
        .field("per-page", settings.per_page)
        .field("sandbox", settings.sandbox);

    tracing::debug!(endpoint = endpoint(&settings), "prepared list request");
    emit(settings.format, settings.output.as_deref(), out, &[record])
}
