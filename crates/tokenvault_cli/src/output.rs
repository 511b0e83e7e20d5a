//! Terminal output helpers
//!
//! One place for the CLI's human-facing formatting so commands stay
//! consistent about colors and prefixes. Diagnostics (errors with causes and
//! help) go through miette instead; this is for the happy path.

use owo_colors::OwoColorize;

/// Consistent human-facing output for CLI commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Plain progress/status line.
    pub fn status(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Section heading.
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
    }

    /// Labeled informational line.
    pub fn info(&self, label: &str, value: &str) {
        println!("{} {}", label.bright_blue(), value);
    }

    /// Key/value detail line.
    pub fn kv(&self, key: &str, value: &str) {
        println!("{}: {}", key.dimmed(), value);
    }

    pub fn success(&self, msg: &str) {
        println!("{} {}", "✓".bright_green(), msg);
    }

    pub fn warning(&self, msg: &str) {
        println!("{} {}", "⚠".yellow(), msg);
    }
}
