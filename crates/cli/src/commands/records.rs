//! Raw benchmark row listing

use anyhow::Result;
use capacity_lib::normalizer::matches_component;
use capacity_lib::{ComponentCategory, RawBenchmarkRow, TestEnvironment};
use std::path::Path;
use tabled::Tabled;

use crate::loader::{component_from_path, load_rows};
use crate::output::{color_success, format_throughput, print_json, print_rows, print_warning, OutputFormat};

/// Row for the records table
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Throughput")]
    throughput: String,
    #[tabled(rename = "Latency (ms)")]
    latency_ms: String,
    #[tabled(rename = "Env")]
    environment: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Name a row is known by: its own component column, else the table's
fn row_component(row: &RawBenchmarkRow, default_component: &str) -> String {
    row.component
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(default_component)
        .to_string()
}

/// List up to `limit` rows of a benchmark table as seen by the engine
///
/// With a component filter only rows of that component are listed; a table
/// belonging to another component lists nothing.
pub fn list_records(
    file: &Path,
    category: ComponentCategory,
    component_filter: Option<&str>,
    env: &TestEnvironment,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let default_component = component_from_path(file);
    let rows: Vec<(usize, RawBenchmarkRow)> = load_rows(file)?
        .into_iter()
        .enumerate()
        .filter(|(_, row)| {
            component_filter
                .map(|filter| matches_component(&row_component(row, &default_component), filter))
                .unwrap_or(true)
        })
        .collect();
    let total = rows.len();

    match format {
        OutputFormat::Json => {
            let shown: Vec<_> = rows.into_iter().take(limit).map(|(_, row)| row).collect();
            print_json(&shown)?;
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                print_warning(&format!("{} has no matching rows", file.display()));
                return Ok(());
            }

            let listed: Vec<RecordRow> = rows
                .iter()
                .take(limit)
                .map(|(index, row)| match row.into_record(category, env, &default_component) {
                    Ok(record) => RecordRow {
                        index: *index,
                        component: record.component,
                        throughput: format_throughput(record.throughput),
                        latency_ms: format!("{:.2}", record.latency_ms),
                        environment: format!("{}c / {}GB", record.test_cpu_cores, record.test_memory_gb),
                        status: color_success(record.success),
                    },
                    Err(err) => RecordRow {
                        index: *index,
                        component: row_component(row, &default_component),
                        throughput: "-".to_string(),
                        latency_ms: "-".to_string(),
                        environment: "-".to_string(),
                        status: err.to_string(),
                    },
                })
                .collect();

            print_rows(listed);
            if total > limit {
                println!("\nShowing {} of {} rows", limit, total);
            }
        }
    }

    Ok(())
}
