//! Structured logging for engine callers
//!
//! The engine itself never logs; callers use [`StructuredLogger`] to emit
//! one consistently shaped tracing event per operation they run.

use crate::error::CapacityError;
use crate::evaluation::PerformanceSummary;
use crate::models::{CapacityRecommendation, ComponentCategory, TargetSlo};
use tracing::{info, warn};

/// Structured logger for capacity planning events
///
/// `source` names the benchmark table the events refer to.
#[derive(Clone)]
pub struct StructuredLogger {
    source: String,
}

impl StructuredLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Log a normalization pass
    pub fn log_normalization(
        &self,
        component: &str,
        category: ComponentCategory,
        input_rows: usize,
        baselines: usize,
    ) {
        let excluded = input_rows.saturating_sub(baselines);
        if excluded > 0 {
            warn!(
                event = "benchmark_normalized",
                source = %self.source,
                component = %component,
                category = %category,
                input_rows = input_rows,
                baselines = baselines,
                excluded_rows = excluded,
                "Normalized benchmark table, some rows excluded"
            );
        } else {
            info!(
                event = "benchmark_normalized",
                source = %self.source,
                component = %component,
                category = %category,
                input_rows = input_rows,
                baselines = baselines,
                "Normalized benchmark table"
            );
        }
    }

    /// Log a successful extrapolation
    pub fn log_extrapolation(
        &self,
        component: &str,
        target: &TargetSlo,
        rec: &CapacityRecommendation,
    ) {
        if rec.latency_bound_met {
            info!(
                event = "capacity_extrapolated",
                source = %self.source,
                component = %component,
                category = %target.category,
                target_throughput = target.throughput,
                max_latency_ms = target.max_latency_ms,
                required_cpu_cores = rec.required_cpu_cores,
                required_memory_gb = rec.required_memory_gb,
                estimated_latency_ms = rec.estimated_latency_ms,
                basis_throughput_per_core = rec.baseline.throughput_per_core,
                "Extrapolated capacity"
            );
        } else {
            warn!(
                event = "capacity_extrapolated",
                source = %self.source,
                component = %component,
                category = %target.category,
                target_throughput = target.throughput,
                max_latency_ms = target.max_latency_ms,
                required_cpu_cores = rec.required_cpu_cores,
                required_memory_gb = rec.required_memory_gb,
                estimated_latency_ms = rec.estimated_latency_ms,
                basis_throughput_per_core = rec.baseline.throughput_per_core,
                "Extrapolated capacity, baseline latency exceeds target bound"
            );
        }
    }

    /// Log an extrapolation that could not produce a recommendation
    pub fn log_extrapolation_failed(&self, component: &str, target: &TargetSlo, err: &CapacityError) {
        warn!(
            event = "capacity_extrapolation_failed",
            source = %self.source,
            component = %component,
            category = %target.category,
            target_throughput = target.throughput,
            no_data = err.is_no_data(),
            error = %err,
            "Capacity extrapolation failed"
        );
    }

    /// Log a best-run summary
    pub fn log_summary(&self, category: ComponentCategory, summary: Option<&PerformanceSummary>) {
        match summary {
            Some(s) => info!(
                event = "performance_summarized",
                source = %self.source,
                category = %category,
                component = %s.component,
                throughput = s.throughput,
                latency_ms = s.latency_ms,
                "Summarized best benchmark run"
            ),
            None => warn!(
                event = "performance_summarized",
                source = %self.source,
                category = %category,
                "No successful benchmark run to summarize"
            ),
        }
    }
}
