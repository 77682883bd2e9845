//! Terminal presentation
//!
//! Results are printed to stdout. Warnings and hints go to stderr so a
//! `--format json` run leaves nothing but the document on stdout.

mod actions;

pub use actions::ActionOutputs;

use std::fmt::Display;

use console::{style, StyledObject};

/// Width of the label column in `key_value` lines
const LABEL_WIDTH: usize = 17;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print a hint to stderr
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Section heading
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Indented `label: value` line with the values aligned
pub fn key_value(key: &str, value: impl Display) -> String {
    let label = format!("{}:", key);
    format!("  {} {}", style(format!("{:<LABEL_WIDTH$}", label)).dim(), value)
}

pub fn version<D>(value: D) -> StyledObject<D> {
    style(value).green().bold()
}

pub fn bump<D>(value: D) -> StyledObject<D> {
    style(value).yellow()
}

pub fn tag<D>(value: D) -> StyledObject<D> {
    style(value).yellow()
}

/// A command line the user can run
pub fn command<D>(value: D) -> StyledObject<D> {
    style(value).cyan().bold()
}

pub fn path<D>(value: D) -> StyledObject<D> {
    style(value).cyan()
}
