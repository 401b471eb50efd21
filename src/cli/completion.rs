//! `completion`: generate shell completion scripts.

use anyhow::Result;
use clap::{Args, Command};
use clap_complete::Shell;
use std::io::Write;

use super::tree::{cmd_root, CMD_NAME};

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn command() -> Command {
    CompletionArgs::augment_args(
        Command::new("completion").about("Generate a shell completion script"),
    )
}

pub fn run(args: CompletionArgs, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(args.shell, &mut cmd_root(), CMD_NAME, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completion_mentions_subcommands() {
        let mut out = Vec::new();
        run(CompletionArgs { shell: Shell::Bash }, &mut out).expect("generate");
        let script = String::from_utf8(out).expect("utf8");
        assert!(script.contains("opensdk"));
        assert!(script.contains("cfg"));
    }
}
