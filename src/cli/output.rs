//! Terminal output shared by the commands

use crate::cli::context::CliContext;
use bytesize::ByteSize;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::time::Duration;

/// Announce a step, e.g. `Pushing x to y (ssh).`
pub fn marker(message: impl Display) {
    if !CliContext::is_quiet() {
        println!("{} {}", "→".cyan(), message);
    }
}

/// An indented list entry: `    * <text>`
pub fn item(text: impl Display) {
    println!("    * {}", text);
}

pub fn success(message: impl Display) {
    if !CliContext::is_quiet() {
        println!("{} {}", "✓".green(), message);
    }
}

pub fn warning(message: impl Display) {
    if !CliContext::is_quiet() {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

/// Human readable byte count
pub fn format_bytes(bytes: u64) -> String {
    ByteSize(bytes).to_string()
}

/// Spinner on stderr, hidden when progress output is disabled
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if !CliContext::show_progress() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({pos:>7} entries)") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
