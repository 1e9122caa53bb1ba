//! CLI console utilities

use colored::*;
use serde::Serialize;

/// Console for formatted or JSON output
pub struct CliConsole {
    json: bool,
}

impl CliConsole {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✓".green().bold(), message.green());
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.json {
            println!("{} {}", "⚠".yellow().bold(), message.yellow());
        }
    }

    pub fn print_header(&self, title: &str) {
        if !self.json {
            println!();
            println!("{}", title.bold().underline());
            println!("{}", "=".repeat(title.len()).dimmed());
        }
    }

    /// Print an aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        if !self.json {
            println!("  {:<18} {}", format!("{label}:").dimmed(), value);
        }
    }
}

/// Human-readable byte count
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
