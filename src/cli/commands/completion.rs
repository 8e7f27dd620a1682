use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "vrepo";

/// Generate shell completion scripts.
/// The script goes to stdout, installation hints to stderr.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(vrepo completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save the script to a file in your fpath:");
            eprintln!(
                "  {}",
                "vrepo completion zsh > ~/.local/share/zsh/site-functions/_vrepo".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "vrepo completion fish > ~/.config/fish/completions/vrepo.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!("  {}", "Invoke-Expression (& vrepo completion powershell)".cyan());
        },
        _ => {
            eprintln!("  Please refer to your shell's documentation for installing completion scripts.");
        },
    }

    Ok(())
}
