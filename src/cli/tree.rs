//! Command tree construction.
//!
//! The root command is assembled from an ordered list of attachment
//! functions, each taking the tree handle and returning it extended.

use clap::{Args, Command};

use super::flags::GlobalArgs;
use super::{bar, cfg, completion, foo, version};

pub const CMD_NAME: &str = "opensdk";

/// One step of command tree construction.
pub type CmdOption = Box<dyn FnOnce(Command) -> Command>;

/// Apply `options` to `cmd` in order.
pub fn init_cmd(cmd: Command, options: impl IntoIterator<Item = CmdOption>) -> Command {
    options.into_iter().fold(cmd, |cmd, option| option(cmd))
}

/// Attach a subcommand.
pub fn with_cmd(sub: Command) -> CmdOption {
    Box::new(move |cmd| cmd.subcommand(sub))
}

/// Attach the persistent flags shared by every subcommand.
pub fn with_flags_global() -> CmdOption {
    Box::new(GlobalArgs::augment_args)
}

/// The `opensdk` command with all subcommands and global flags.
pub fn cmd_root() -> Command {
    let root = Command::new(CMD_NAME)
        .about("Command-line client for the OpenSDK API")
        .version(env!("CARGO_PKG_VERSION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true);

    init_cmd(
        root,
        [
            with_cmd(foo::command()),
            with_cmd(bar::command()),
            with_cmd(cfg::command()),
            with_cmd(version::command()),
            with_cmd(completion::command()),
            with_flags_global(),
        ],
    )
}
