//! `roombook completions <shell>`: print a completion script to stdout.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "roombook";

/// Print a shell completion script
#[derive(Parser)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        // Comments go to stderr so the script can be redirected as-is
        if !global.quiet {
            match install_hint(self.shell) {
                Some(hint) => eprintln!("# {} completions; install with:\n#   {hint}", self.shell),
                None => eprintln!("# {} completions", self.shell),
            }
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn install_hint(shell: Shell) -> Option<&'static str> {
    Some(match shell {
        Shell::Bash => {
            "roombook completions bash > ~/.local/share/bash-completion/completions/roombook"
        }
        Shell::Zsh => "roombook completions zsh > ~/.zsh/completions/_roombook",
        Shell::Fish => "roombook completions fish > ~/.config/fish/completions/roombook.fish",
        Shell::PowerShell => "roombook completions powershell | Out-String | Invoke-Expression",
        _ => return None,
    })
}
