//! Module for generating shell completion scripts for the CLI.

use clap::CommandFactory;
use clap_complete::{generate, shells::Shell};
use std::io;

/// Writes the completion script for `shell` to stdout.
///
/// # Arguments
/// * `shell` - Target shell (bash, zsh, fish, powershell, elvish)
pub fn generate_completion(shell: Shell) {
    let mut app = crate::Cli::command();
    generate(shell, &mut app, "dallani", &mut io::stdout());
}
