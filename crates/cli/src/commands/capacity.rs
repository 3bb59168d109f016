//! Normalization and extrapolation commands

use anyhow::{bail, Result};
use capacity_lib::{
    extrapolate, normalize_rows, CapacityReport, ComponentCategory, NormalizedBaseline,
    StructuredLogger, TargetSlo, TestEnvironment,
};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use crate::loader::{component_from_path, load_rows};
use crate::output::{
    color_bound, format_latency, format_percent, format_throughput, print_info, print_json,
    print_rows, print_warning, FieldRow, OutputFormat,
};

/// Row for the baseline table
#[derive(Tabled)]
struct BaselineRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Per Core")]
    per_core: String,
    #[tabled(rename = "Per GB")]
    per_gb: String,
    #[tabled(rename = "Latency")]
    latency: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Test Env")]
    environment: String,
}

impl From<&NormalizedBaseline> for BaselineRow {
    fn from(b: &NormalizedBaseline) -> Self {
        Self {
            component: b.component.clone(),
            per_core: format_throughput(b.throughput_per_core),
            per_gb: format_throughput(b.throughput_per_gb),
            latency: format_latency(b.latency_ms, b.category.latency_kind()),
            cpu: format_percent(b.cpu_utilization_pct),
            memory: format_percent(b.memory_utilization_pct),
            environment: format!("{}c / {}GB", b.source_cpu_cores, b.source_memory_gb),
        }
    }
}

/// JSON envelope for an extrapolation
#[derive(Serialize)]
struct ExtrapolationOutput {
    generated_at: String,
    #[serde(flatten)]
    report: CapacityReport,
}

fn require_component(component: &str) -> Result<()> {
    if component.trim().is_empty() {
        bail!("component name must not be empty");
    }
    Ok(())
}

/// Normalize a benchmark table and print the baselines
pub fn show_baselines(
    file: &Path,
    category: ComponentCategory,
    component: &str,
    env: &TestEnvironment,
    format: OutputFormat,
) -> Result<()> {
    require_component(component)?;
    let rows = load_rows(file)?;
    let baselines = normalize_rows(&rows, category, env, &component_from_path(file), component);

    let logger = StructuredLogger::new(file.display().to_string());
    logger.log_normalization(component, category, rows.len(), baselines.len());

    match format {
        OutputFormat::Json => print_json(&baselines)?,
        OutputFormat::Table => {
            if baselines.is_empty() {
                print_warning(&format!("No usable {} runs for {}", category, component));
                return Ok(());
            }
            let count = baselines.len();
            print_rows(baselines.iter().map(BaselineRow::from).collect());
            println!("\nTotal: {} baselines ({} rows excluded)", count, rows.len() - count);
        }
    }

    Ok(())
}

/// Extrapolate the allocation needed for a target throughput
pub fn extrapolate_capacity(
    file: &Path,
    category: ComponentCategory,
    component: &str,
    env: &TestEnvironment,
    target: TargetSlo,
    format: OutputFormat,
) -> Result<()> {
    require_component(component)?;
    let rows = load_rows(file)?;
    let baselines = normalize_rows(&rows, category, env, &component_from_path(file), component);

    let logger = StructuredLogger::new(file.display().to_string());
    logger.log_normalization(component, category, rows.len(), baselines.len());

    let recommendation = match extrapolate(&baselines, &target) {
        Ok(rec) => rec,
        Err(err) => {
            logger.log_extrapolation_failed(component, &target, &err);
            return Err(err.into());
        }
    };
    logger.log_extrapolation(component, &target, &recommendation);

    let report = CapacityReport::new(component, &recommendation);

    match format {
        OutputFormat::Json => print_json(&ExtrapolationOutput {
            generated_at: chrono::Utc::now().to_rfc3339(),
            report,
        })?,
        OutputFormat::Table => {
            let kind = category.latency_kind();
            let basis = &recommendation.baseline;
            let rows = vec![
                FieldRow::new("Component", format!("{} ({})", component, category)),
                FieldRow::new("Target throughput", format_throughput(target.throughput)),
                FieldRow::new("Required CPU cores", recommendation.required_cpu_cores.to_string()),
                FieldRow::new("Required memory", format!("{} GB", recommendation.required_memory_gb)),
                FieldRow::new(
                    "Estimated latency",
                    format_latency(recommendation.estimated_latency_ms, kind),
                ),
                FieldRow::new(
                    "Latency bound",
                    format!(
                        "{} ({})",
                        color_bound(recommendation.latency_bound_met),
                        format_latency(target.max_latency_ms, kind)
                    ),
                ),
                FieldRow::new("Basis per core", format_throughput(basis.throughput_per_core)),
                FieldRow::new("Basis per GB", format_throughput(basis.throughput_per_gb)),
                FieldRow::new("Basis CPU", format_percent(basis.cpu_utilization_pct)),
                FieldRow::new("Basis memory", format_percent(basis.memory_utilization_pct)),
            ];
            print_rows(rows);

            print_info("Cores assume throughput scales linearly with CPU within the benchmarked range");
            if !recommendation.latency_bound_met {
                print_warning("Baseline latency already exceeds the target bound; latency is not guaranteed");
            }
        }
    }

    Ok(())
}
