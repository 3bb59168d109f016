//! Core data models for the capacity engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of middleware a benchmark was run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Storage engine, measured in transactions per second
    #[serde(rename = "DB")]
    Db,
    /// Message broker, measured in messages received per second
    #[serde(rename = "MQ")]
    Mq,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 2] = [ComponentCategory::Db, ComponentCategory::Mq];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Db => "DB",
            ComponentCategory::Mq => "MQ",
        }
    }

    /// Which latency statistic the category's benchmarks report
    pub fn latency_kind(&self) -> LatencyKind {
        match self {
            ComponentCategory::Db => LatencyKind::Average,
            ComponentCategory::Mq => LatencyKind::P95,
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DB" => Ok(ComponentCategory::Db),
            "MQ" => Ok(ComponentCategory::Mq),
            other => Err(format!("unknown component type '{}', expected DB or MQ", other)),
        }
    }
}

/// Latency statistic carried by a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyKind {
    Average,
    P95,
}

/// Hardware the benchmark ran on, used when a row does not say
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestEnvironment {
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self {
            cpu_cores: 4,
            memory_gb: 4.0,
        }
    }
}

/// One measured benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub component: String,
    pub category: ComponentCategory,
    /// Requests/sec for DB, messages/sec for MQ
    pub throughput: f64,
    /// Average for DB, p95 for MQ
    pub latency_ms: f64,
    pub cpu_utilization_pct: f64,
    pub memory_utilization_pct: f64,
    pub memory_used_gb: f64,
    pub test_cpu_cores: u32,
    pub test_memory_gb: f64,
    pub success: bool,
}

/// A benchmark record expressed per unit of resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBaseline {
    pub component: String,
    pub category: ComponentCategory,
    pub throughput_per_core: f64,
    pub throughput_per_gb: f64,
    /// Observed in the test environment; not scaled
    pub latency_ms: f64,
    pub cpu_utilization_pct: f64,
    pub memory_utilization_pct: f64,
    pub memory_used_gb: f64,
    pub source_cpu_cores: u32,
    pub source_memory_gb: f64,
}

impl NormalizedBaseline {
    /// Memory per core observed in the test environment
    pub fn memory_per_core_gb(&self) -> f64 {
        self.source_memory_gb / self.source_cpu_cores as f64
    }
}

/// Target service-level objective for an extrapolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSlo {
    pub category: ComponentCategory,
    pub throughput: f64,
    /// Average for DB, p95 for MQ
    pub max_latency_ms: f64,
}

impl TargetSlo {
    pub fn new(category: ComponentCategory, throughput: f64, max_latency_ms: f64) -> Self {
        Self {
            category,
            throughput,
            max_latency_ms,
        }
    }
}

/// Metrics of the baseline chosen as scaling basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub component: String,
    pub throughput_per_core: f64,
    pub throughput_per_gb: f64,
    pub cpu_utilization_pct: f64,
    pub memory_utilization_pct: f64,
    pub source_cpu_cores: u32,
    pub source_memory_gb: f64,
}

impl From<&NormalizedBaseline> for BaselineMetrics {
    fn from(b: &NormalizedBaseline) -> Self {
        Self {
            component: b.component.clone(),
            throughput_per_core: b.throughput_per_core,
            throughput_per_gb: b.throughput_per_gb,
            cpu_utilization_pct: b.cpu_utilization_pct,
            memory_utilization_pct: b.memory_utilization_pct,
            source_cpu_cores: b.source_cpu_cores,
            source_memory_gb: b.source_memory_gb,
        }
    }
}

/// Minimum allocation projected to satisfy a target SLO
///
/// Cores assume throughput scales linearly with CPU inside the benchmark's
/// validity range. `estimated_latency_ms` is the baseline's observed latency
/// and is an optimistic lower bound: it only holds if the target allocation
/// keeps the baseline's per-core load factor or better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecommendation {
    pub category: ComponentCategory,
    pub required_cpu_cores: u32,
    pub required_memory_gb: u32,
    pub estimated_latency_ms: f64,
    /// False when the baseline latency already exceeds the target bound
    pub latency_bound_met: bool,
    pub baseline: BaselineMetrics,
}
