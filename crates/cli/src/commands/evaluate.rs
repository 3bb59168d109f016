//! Best-run summary and SLO-fit commands

use anyhow::{bail, Result};
use capacity_lib::{
    summarize, task_fit, BenchmarkRecord, ComponentCategory, PerformanceSummary,
    StructuredLogger, TaskFit, TestEnvironment,
};
use std::path::Path;
use tabled::Tabled;

use crate::loader::{component_from_path, load_records};
use crate::output::{
    format_latency, format_percent, format_throughput, print_json, print_rows, print_success,
    print_warning, FieldRow, OutputFormat,
};

/// Row for the fit table
#[derive(Tabled)]
struct FitRow {
    #[tabled(rename = "Type")]
    category: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Throughput")]
    throughput: String,
    #[tabled(rename = "Latency")]
    latency: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
}

impl From<&PerformanceSummary> for FitRow {
    fn from(s: &PerformanceSummary) -> Self {
        Self {
            category: s.category.to_string(),
            component: s.component.clone(),
            throughput: format_throughput(s.throughput),
            latency: format_latency(s.latency_ms, s.latency_kind),
            cpu: format_percent(s.cpu_usage_percent),
            memory: format!("{} ({:.2} GB)", format_percent(s.memory_usage_percent), s.memory_used_gb),
        }
    }
}

/// Print the best observed run of a benchmark table
pub fn show_summary(
    file: &Path,
    category: ComponentCategory,
    component: Option<String>,
    env: &TestEnvironment,
    format: OutputFormat,
) -> Result<()> {
    let component = component.unwrap_or_else(|| component_from_path(file));
    let records = load_records(file, category, env, &component)?;
    let summary = summarize(&records, category);

    StructuredLogger::new(file.display().to_string()).log_summary(category, summary.as_ref());

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => match summary {
            None => print_warning(&format!("No successful {} runs in {}", category, file.display())),
            Some(s) => print_rows(vec![
                FieldRow::new("Component", format!("{} ({})", s.component, s.category)),
                FieldRow::new("Throughput", format_throughput(s.throughput)),
                FieldRow::new("Latency", format_latency(s.latency_ms, s.latency_kind)),
                FieldRow::new("CPU usage", format_percent(s.cpu_usage_percent)),
                FieldRow::new("Memory usage", format_percent(s.memory_usage_percent)),
                FieldRow::new("Memory used", format!("{:.2} GB", s.memory_used_gb)),
            ]),
        },
    }

    Ok(())
}

fn load_category(
    file: Option<&Path>,
    category: ComponentCategory,
    env: &TestEnvironment,
) -> Result<Vec<BenchmarkRecord>> {
    match file {
        Some(path) => load_records(path, category, env, &component_from_path(path)),
        None => Ok(Vec::new()),
    }
}

/// Find the best DB and MQ runs meeting a latency bound and throughput floor
pub fn show_fit(
    db_file: Option<&Path>,
    mq_file: Option<&Path>,
    max_latency_ms: f64,
    min_throughput: f64,
    env: &TestEnvironment,
    format: OutputFormat,
) -> Result<()> {
    if db_file.is_none() && mq_file.is_none() {
        bail!("at least one of --db-file or --mq-file is required");
    }

    let mut records = load_category(db_file, ComponentCategory::Db, env)?;
    records.extend(load_category(mq_file, ComponentCategory::Mq, env)?);

    let fit: TaskFit = task_fit(&records, max_latency_ms, min_throughput);

    match format {
        OutputFormat::Json => print_json(&fit)?,
        OutputFormat::Table => {
            let rows: Vec<FitRow> = fit
                .database
                .iter()
                .chain(fit.message_queue.iter())
                .map(FitRow::from)
                .collect();

            if rows.is_empty() {
                print_warning("No benchmark run satisfies the constraints");
                return Ok(());
            }
            print_rows(rows);

            if fit.is_complete() {
                print_success("Database and message queue both meet the constraints");
            } else if db_file.is_some() && mq_file.is_some() {
                print_warning("Only part of the stack meets the constraints");
            }
        }
    }

    Ok(())
}
