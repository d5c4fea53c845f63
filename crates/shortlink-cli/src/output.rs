//! Terminal output helpers.

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Errors go to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a backend payload. Bare strings are printed as-is.
pub fn payload(value: &Value) -> Result<()> {
    match value {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}
