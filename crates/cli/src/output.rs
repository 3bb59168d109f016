//! Output formatting utilities

use capacity_lib::LatencyKind;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// One labelled value in a two-column table
#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Print a rounded table
pub fn print_rows<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a throughput figure
pub fn format_throughput(value: f64) -> String {
    if value >= 10_000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a latency with the statistic it represents
pub fn format_latency(ms: f64, kind: LatencyKind) -> String {
    match kind {
        LatencyKind::Average => format!("{:.2} ms (avg)", ms),
        LatencyKind::P95 => format!("{:.2} ms (p95)", ms),
    }
}

/// Format a utilization percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Color the latency-bound verdict
pub fn color_bound(met: bool) -> String {
    if met {
        "met".green().to_string()
    } else {
        "not guaranteed".red().to_string()
    }
}

/// Color a run's success flag
pub fn color_success(success: bool) -> String {
    if success {
        "ok".green().to_string()
    } else {
        "failed".red().to_string()
    }
}
