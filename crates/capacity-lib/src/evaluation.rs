//! Best-run summaries and SLO-fit lookups over benchmark records
//!
//! Both operations look at absolute (not normalized) measurements: they
//! answer "what did the test environment achieve" rather than "what would
//! a different allocation need".

use crate::models::{BenchmarkRecord, ComponentCategory, LatencyKind};
use serde::{Deserialize, Serialize};

/// Best observed run for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub component: String,
    pub category: ComponentCategory,
    pub throughput: f64,
    pub latency_ms: f64,
    pub latency_kind: LatencyKind,
    pub cpu_usage_percent: f64,
    pub memory_usage_percent: f64,
    pub memory_used_gb: f64,
}

impl From<&BenchmarkRecord> for PerformanceSummary {
    fn from(r: &BenchmarkRecord) -> Self {
        Self {
            component: r.component.clone(),
            category: r.category,
            throughput: r.throughput,
            latency_ms: r.latency_ms,
            latency_kind: r.category.latency_kind(),
            cpu_usage_percent: r.cpu_utilization_pct,
            memory_usage_percent: r.memory_utilization_pct,
            memory_used_gb: r.memory_used_gb,
        }
    }
}

/// Task-level bounds a benchmark run must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskConstraints {
    pub category: ComponentCategory,
    pub max_latency_ms: f64,
    pub min_throughput: f64,
}

impl TaskConstraints {
    pub fn admits(&self, record: &BenchmarkRecord) -> bool {
        record.category == self.category
            && record.success
            && record.latency_ms <= self.max_latency_ms
            && record.throughput >= self.min_throughput
    }
}

/// Best DB and MQ runs that satisfy the same latency / throughput bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFit {
    pub database: Option<PerformanceSummary>,
    pub message_queue: Option<PerformanceSummary>,
}

impl TaskFit {
    /// Both halves of the stack found a qualifying run
    pub fn is_complete(&self) -> bool {
        self.database.is_some() && self.message_queue.is_some()
    }
}

fn highest_throughput<'a>(
    records: impl Iterator<Item = &'a BenchmarkRecord>,
) -> Option<&'a BenchmarkRecord> {
    records.reduce(|best, r| if r.throughput > best.throughput { r } else { best })
}

/// Highest-throughput successful run of `category`
pub fn summarize(
    records: &[BenchmarkRecord],
    category: ComponentCategory,
) -> Option<PerformanceSummary> {
    highest_throughput(
        records
            .iter()
            .filter(|r| r.success && r.category == category),
    )
    .map(PerformanceSummary::from)
}

/// Highest-throughput run admitted by `constraints`
pub fn best_fit<'a>(
    records: &'a [BenchmarkRecord],
    constraints: &TaskConstraints,
) -> Option<&'a BenchmarkRecord> {
    highest_throughput(records.iter().filter(|r| constraints.admits(r)))
}

/// Run [`best_fit`] for both categories under one set of bounds
pub fn task_fit(records: &[BenchmarkRecord], max_latency_ms: f64, min_throughput: f64) -> TaskFit {
    let pick = |category| {
        let constraints = TaskConstraints {
            category,
            max_latency_ms,
            min_throughput,
        };
        best_fit(records, &constraints).map(PerformanceSummary::from)
    };
    TaskFit {
        database: pick(ComponentCategory::Db),
        message_queue: pick(ComponentCategory::Mq),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(category: ComponentCategory, throughput: f64, latency_ms: f64, success: bool) -> BenchmarkRecord {
        BenchmarkRecord {
            component: match category {
                ComponentCategory::Db => "KingbaseES".to_string(),
                ComponentCategory::Mq => "RabbitMQ".to_string(),
            },
            category,
            throughput,
            latency_ms,
            cpu_utilization_pct: 55.0,
            memory_utilization_pct: 35.0,
            memory_used_gb: 2.5,
            test_cpu_cores: 4,
            test_memory_gb: 4.0,
            success,
        }
    }

    #[test]
    fn test_summary_picks_highest_throughput() {
        let records = vec![
            run(ComponentCategory::Db, 800.0, 20.0, true),
            run(ComponentCategory::Db, 1500.0, 90.0, true),
            run(ComponentCategory::Db, 9000.0, 5.0, false),
            run(ComponentCategory::Mq, 50_000.0, 5.0, true),
        ];
        let summary = summarize(&records, ComponentCategory::Db).unwrap();
        assert_eq!(summary.throughput, 1500.0);
        assert_eq!(summary.latency_ms, 90.0);
        assert_eq!(summary.latency_kind, LatencyKind::Average);
        assert_eq!(summary.memory_used_gb, 2.5);
    }

    #[test]
    fn test_summary_empty() {
        let records = vec![run(ComponentCategory::Db, 800.0, 20.0, false)];
        assert!(summarize(&records, ComponentCategory::Db).is_none());
        assert!(summarize(&records, ComponentCategory::Mq).is_none());
    }

    #[test]
    fn test_best_fit_respects_bounds() {
        let records = vec![
            run(ComponentCategory::Db, 800.0, 20.0, true),
            run(ComponentCategory::Db, 1500.0, 120.0, true),
            run(ComponentCategory::Db, 1100.0, 60.0, true),
            run(ComponentCategory::Db, 500.0, 10.0, true),
        ];
        let constraints = TaskConstraints {
            category: ComponentCategory::Db,
            max_latency_ms: 100.0,
            min_throughput: 600.0,
        };
        let best = best_fit(&records, &constraints).unwrap();
        assert_eq!(best.throughput, 1100.0);
    }

    #[test]
    fn test_task_fit_both_categories() {
        let records = vec![
            run(ComponentCategory::Db, 1200.0, 40.0, true),
            run(ComponentCategory::Mq, 20_000.0, 80.0, true),
            run(ComponentCategory::Mq, 30_000.0, 400.0, true),
        ];
        let fit = task_fit(&records, 100.0, 1000.0);
        assert!(fit.is_complete());
        assert_eq!(fit.database.unwrap().throughput, 1200.0);
        let mq = fit.message_queue.unwrap();
        assert_eq!(mq.throughput, 20_000.0);
        assert_eq!(mq.latency_kind, LatencyKind::P95);
    }

    #[test]
    fn test_task_fit_partial() {
        let records = vec![run(ComponentCategory::Db, 1200.0, 40.0, true)];
        let fit = task_fit(&records, 100.0, 1000.0);
        assert!(!fit.is_complete());
        assert!(fit.message_queue.is_none());
    }
}
