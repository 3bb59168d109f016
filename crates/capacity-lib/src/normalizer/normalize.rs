//! Per-core / per-GB normalization

use super::fields::RawBenchmarkRow;
use crate::models::{BenchmarkRecord, ComponentCategory, NormalizedBaseline, TestEnvironment};
use crate::validate::per_unit;

/// Case-insensitive substring match; an empty filter matches everything
pub fn matches_component(component: &str, filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || component.to_lowercase().contains(&filter.to_lowercase())
}

/// Normalize a single record
///
/// Returns `None` when the record has a non-positive core count or memory
/// size and so cannot be expressed per unit of resource.
pub fn normalize_record(record: &BenchmarkRecord) -> Option<NormalizedBaseline> {
    if record.test_cpu_cores == 0 {
        return None;
    }
    let throughput_per_core = per_unit(record.throughput, record.test_cpu_cores as f64)?;
    let throughput_per_gb = per_unit(record.throughput, record.test_memory_gb)?;

    Some(NormalizedBaseline {
        component: record.component.clone(),
        category: record.category,
        throughput_per_core: throughput_per_core.max(0.0),
        throughput_per_gb: throughput_per_gb.max(0.0),
        latency_ms: record.latency_ms,
        cpu_utilization_pct: record.cpu_utilization_pct,
        memory_utilization_pct: record.memory_utilization_pct,
        memory_used_gb: record.memory_used_gb,
        source_cpu_cores: record.test_cpu_cores,
        source_memory_gb: record.test_memory_gb,
    })
}

/// Normalize every successful record whose component matches `component_filter`
///
/// Failed runs, non-matching components and records with a non-positive
/// divisor are dropped silently.
pub fn normalize(records: &[BenchmarkRecord], component_filter: &str) -> Vec<NormalizedBaseline> {
    records
        .iter()
        .filter(|r| r.success && matches_component(&r.component, component_filter))
        .filter_map(normalize_record)
        .collect()
}

/// Convert raw rows for `category` and normalize them in one pass
///
/// `default_component` names rows that carry no component column (usually
/// derived from the table's file name); `component_filter` then selects rows
/// by name exactly as [`normalize`] does.
pub fn normalize_rows(
    rows: &[RawBenchmarkRow],
    category: ComponentCategory,
    env: &TestEnvironment,
    default_component: &str,
    component_filter: &str,
) -> Vec<NormalizedBaseline> {
    let records: Vec<BenchmarkRecord> = rows
        .iter()
        .filter_map(|row| row.into_record(category, env, default_component).ok())
        .collect();
    normalize(&records, component_filter)
}
