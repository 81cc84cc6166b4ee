//! CLI output formatting.
//!
//! Human-readable text by default; one JSON document per command with
//! `--json`. `--quiet` suppresses everything but errors and JSON.

use std::sync::OnceLock;

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output settings shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

fn config() -> OutputConfig {
    OUTPUT_CONFIG.get().copied().unwrap_or_default()
}

/// Apply output settings from global CLI flags. Only the first call counts.
pub fn configure(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

#[must_use]
pub fn is_json() -> bool {
    config().json
}

fn suppressed() -> bool {
    let config = config();
    config.json || config.quiet
}

/// Print the application header with name and version.
pub fn header(subtitle: &str) {
    if suppressed() {
        return;
    }
    println!("draftwise {}  {subtitle}", env!("CARGO_PKG_VERSION"));
    println!();
}

pub fn section(title: &str) {
    if suppressed() {
        return;
    }
    println!();
    println!("{title}");
}

/// Print a labeled value.
pub fn field(label: &str, value: impl std::fmt::Display) {
    if suppressed() {
        return;
    }
    println!("  {label:<12} {value}");
}

pub fn success(message: &str) {
    if suppressed() {
        return;
    }
    println!("  ✓ {message}");
}

pub fn warning(message: &str) {
    if config().json {
        return;
    }
    eprintln!("  ⚠ {message}");
}

pub fn error(message: &str) {
    if config().json {
        eprintln!("{}", serde_json::json!({ "error": message }));
        return;
    }
    eprintln!("  × {message}");
}

/// Render rows as a rounded table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    if suppressed() {
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn json_output(value: &serde_json::Value) {
    println!("{value}");
}
