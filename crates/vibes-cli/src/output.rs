//! Output formatting helpers.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Redraw an in-place progress line on stderr.
pub fn progress(label: &str, percent: f64) {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\r{} {:>5.1}%", label.dimmed(), percent);
    if percent >= 100.0 {
        let _ = writeln!(stderr);
    }
    let _ = stderr.flush();
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
