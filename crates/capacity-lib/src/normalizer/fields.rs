//! Raw benchmark rows and the per-category column table

use crate::error::{CapacityError, Result};
use crate::models::{BenchmarkRecord, ComponentCategory, TestEnvironment};
use crate::validate::{clean_percent, is_non_negative};
use serde::{Deserialize, Serialize};

/// One row of a benchmark result table, every column optional
///
/// Default policy when a column is absent:
/// - throughput / latency for the row's category: the row is malformed
/// - success column: the run counts as failed
/// - CPU %, memory %, memory used: 0.0
/// - `cpu_cores` / `memory_gb`: the caller's [`TestEnvironment`]
/// - `component`: the caller's component name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBenchmarkRow {
    #[serde(alias = "component_name")]
    pub component: Option<String>,
    pub tps_excluding: Option<f64>,
    pub latency_ms_avg: Option<f64>,
    pub return_code: Option<i64>,
    pub avg_received_msg_s: Option<f64>,
    pub worst_p95_ms: Option<f64>,
    pub success: Option<bool>,
    pub avg_cpu_percent: Option<f64>,
    pub avg_memory_percent: Option<f64>,
    pub avg_memory_used_gb: Option<f64>,
    #[serde(alias = "test_cpu_cores")]
    pub cpu_cores: Option<f64>,
    #[serde(alias = "test_memory_gb")]
    pub memory_gb: Option<f64>,
}

/// Where a category keeps its throughput, latency and success columns
pub struct FieldSelector {
    pub category: ComponentCategory,
    pub throughput_column: &'static str,
    pub latency_column: &'static str,
    throughput: fn(&RawBenchmarkRow) -> Option<f64>,
    latency: fn(&RawBenchmarkRow) -> Option<f64>,
    succeeded: fn(&RawBenchmarkRow) -> Option<bool>,
}

static FIELD_TABLE: [FieldSelector; 2] = [
    FieldSelector {
        category: ComponentCategory::Db,
        throughput_column: "tps_excluding",
        latency_column: "latency_ms_avg",
        throughput: db_throughput,
        latency: db_latency,
        succeeded: db_succeeded,
    },
    FieldSelector {
        category: ComponentCategory::Mq,
        throughput_column: "avg_received_msg_s",
        latency_column: "worst_p95_ms",
        throughput: mq_throughput,
        latency: mq_latency,
        succeeded: mq_succeeded,
    },
];

fn db_throughput(row: &RawBenchmarkRow) -> Option<f64> {
    row.tps_excluding
}

fn db_latency(row: &RawBenchmarkRow) -> Option<f64> {
    row.latency_ms_avg
}

fn db_succeeded(row: &RawBenchmarkRow) -> Option<bool> {
    row.return_code.map(|code| code == 0)
}

fn mq_throughput(row: &RawBenchmarkRow) -> Option<f64> {
    row.avg_received_msg_s
}

fn mq_latency(row: &RawBenchmarkRow) -> Option<f64> {
    row.worst_p95_ms
}

fn mq_succeeded(row: &RawBenchmarkRow) -> Option<bool> {
    row.success
}

impl FieldSelector {
    pub fn for_category(category: ComponentCategory) -> &'static FieldSelector {
        match category {
            ComponentCategory::Db => &FIELD_TABLE[0],
            ComponentCategory::Mq => &FIELD_TABLE[1],
        }
    }

    pub fn throughput(&self, row: &RawBenchmarkRow) -> Option<f64> {
        (self.throughput)(row)
    }

    pub fn latency(&self, row: &RawBenchmarkRow) -> Option<f64> {
        (self.latency)(row)
    }

    pub fn succeeded(&self, row: &RawBenchmarkRow) -> bool {
        (self.succeeded)(row).unwrap_or(false)
    }
}

impl RawBenchmarkRow {
    /// Convert into a typed record for `category`
    pub fn into_record(
        &self,
        category: ComponentCategory,
        env: &TestEnvironment,
        default_component: &str,
    ) -> Result<BenchmarkRecord> {
        let fields = FieldSelector::for_category(category);

        let throughput = required_measure(fields.throughput(self), fields.throughput_column)?;
        let latency_ms = required_measure(fields.latency(self), fields.latency_column)?;

        let test_cpu_cores = match self.cpu_cores {
            None => env.cpu_cores,
            Some(cores) => whole_cores(cores)?,
        };

        let component = self
            .component
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default_component)
            .to_string();

        Ok(BenchmarkRecord {
            component,
            category,
            throughput,
            latency_ms,
            cpu_utilization_pct: clean_percent(self.avg_cpu_percent),
            memory_utilization_pct: clean_percent(self.avg_memory_percent),
            memory_used_gb: self
                .avg_memory_used_gb
                .filter(|gb| is_non_negative(*gb))
                .unwrap_or(0.0),
            test_cpu_cores,
            test_memory_gb: self.memory_gb.unwrap_or(env.memory_gb),
            success: fields.succeeded(self),
        })
    }
}

fn required_measure(value: Option<f64>, column: &str) -> Result<f64> {
    match value {
        None => Err(CapacityError::MalformedRecord(format!(
            "missing column {}",
            column
        ))),
        Some(v) if !is_non_negative(v) => Err(CapacityError::MalformedRecord(format!(
            "{} must be a non-negative number, got {}",
            column, v
        ))),
        Some(v) => Ok(v),
    }
}

fn whole_cores(cores: f64) -> Result<u32> {
    if !is_non_negative(cores) || cores.fract() != 0.0 || cores > u32::MAX as f64 {
        return Err(CapacityError::MalformedRecord(format!(
            "cpu_cores must be a whole non-negative number, got {}",
            cores
        )));
    }
    Ok(cores as u32)
}
