//! opensdk: command-line client for the OpenSDK API
//!
//! Resolves configuration from config files, `OPENSDK_*` environment
//! variables and flags, then dispatches to the selected command.

use anyhow::Result;

fn main() -> Result<()> {
    opensdk::cli::run()
}
