//! Wire shape of an extrapolation result
//!
//! Mirrors the capacity response served to clients: per-category naming of
//! the per-core throughput field, integer allocations, float metrics.

use crate::models::{CapacityRecommendation, ComponentCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetricsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tps_per_core: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_per_sec_per_core: Option<f64>,
    pub throughput_per_gb: f64,
    pub cpu_utilization_pct: f64,
    pub memory_utilization_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub required_cpu_cores: u32,
    pub required_memory_gb: u32,
    /// Average latency for DB, p95 for MQ
    pub estimated_latency_ms: f64,
    pub latency_bound_met: bool,
    pub baseline_metrics: BaselineMetricsReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub component_name: String,
    pub component_type: ComponentCategory,
    pub recommendations: RecommendationReport,
}

impl CapacityReport {
    pub fn new(component_name: impl Into<String>, rec: &CapacityRecommendation) -> Self {
        let per_core = rec.baseline.throughput_per_core;
        let (tps_per_core, msg_per_sec_per_core) = match rec.category {
            ComponentCategory::Db => (Some(per_core), None),
            ComponentCategory::Mq => (None, Some(per_core)),
        };

        Self {
            component_name: component_name.into(),
            component_type: rec.category,
            recommendations: RecommendationReport {
                required_cpu_cores: rec.required_cpu_cores,
                required_memory_gb: rec.required_memory_gb,
                estimated_latency_ms: rec.estimated_latency_ms,
                latency_bound_met: rec.latency_bound_met,
                baseline_metrics: BaselineMetricsReport {
                    tps_per_core,
                    msg_per_sec_per_core,
                    throughput_per_gb: rec.baseline.throughput_per_gb,
                    cpu_utilization_pct: rec.baseline.cpu_utilization_pct,
                    memory_utilization_pct: rec.baseline.memory_utilization_pct,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaselineMetrics;

    fn recommendation(category: ComponentCategory) -> CapacityRecommendation {
        CapacityRecommendation {
            category,
            required_cpu_cores: 5,
            required_memory_gb: 5,
            estimated_latency_ms: 80.0,
            latency_bound_met: true,
            baseline: BaselineMetrics {
                component: "x".to_string(),
                throughput_per_core: 250.0,
                throughput_per_gb: 250.0,
                cpu_utilization_pct: 70.0,
                memory_utilization_pct: 45.0,
                source_cpu_cores: 4,
                source_memory_gb: 4.0,
            },
        }
    }

    #[test]
    fn test_db_report_shape() {
        let report = CapacityReport::new("KingbaseES", &recommendation(ComponentCategory::Db));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["component_type"], "DB");
        assert_eq!(json["recommendations"]["required_cpu_cores"], 5);
        let metrics = &json["recommendations"]["baseline_metrics"];
        assert_eq!(metrics["tps_per_core"], 250.0);
        assert!(metrics.get("msg_per_sec_per_core").is_none());
    }

    #[test]
    fn test_mq_report_shape() {
        let report = CapacityReport::new("RabbitMQ", &recommendation(ComponentCategory::Mq));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["component_type"], "MQ");
        let metrics = &json["recommendations"]["baseline_metrics"];
        assert_eq!(metrics["msg_per_sec_per_core"], 250.0);
        assert!(metrics.get("tps_per_core").is_none());
        assert_eq!(json["recommendations"]["latency_bound_met"], true);
    }
}
