use crate::error::{CapacityError, Result};
use crate::models::{BaselineMetrics, CapacityRecommendation, NormalizedBaseline, TargetSlo};
use crate::validate::{ceil_count, is_positive};

/// Reject targets with a non-positive or non-finite throughput or latency
pub fn validate_target(target: &TargetSlo) -> Result<()> {
    if !is_positive(target.throughput) {
        return Err(CapacityError::InvalidTarget(format!(
            "throughput must be positive, got {}",
            target.throughput
        )));
    }
    if !is_positive(target.max_latency_ms) {
        return Err(CapacityError::InvalidTarget(format!(
            "max latency must be positive, got {}",
            target.max_latency_ms
        )));
    }
    Ok(())
}

/// Pick the baseline of the target's category with the highest throughput per core
///
/// Ties keep the earliest baseline. Baselines with a non-finite throughput
/// per core are skipped.
pub fn select_basis<'a>(
    baselines: &'a [NormalizedBaseline],
    target: &TargetSlo,
) -> Option<&'a NormalizedBaseline> {
    baselines
        .iter()
        .filter(|b| b.category == target.category && b.throughput_per_core.is_finite())
        .reduce(|best, b| {
            if b.throughput_per_core > best.throughput_per_core {
                b
            } else {
                best
            }
        })
}

/// Project the allocation required to meet `target`
///
/// - cores  = ceil(target throughput / basis throughput per core)
/// - memory = ceil(cores * basis memory per core), at least 1 GB
/// - latency is the basis's observed latency, not scaled
pub fn extrapolate(
    baselines: &[NormalizedBaseline],
    target: &TargetSlo,
) -> Result<CapacityRecommendation> {
    validate_target(target)?;

    let basis = select_basis(baselines, target).ok_or_else(|| {
        CapacityError::no_baseline(target.category, "no normalized baseline for this category")
    })?;

    if !is_positive(basis.throughput_per_core) || basis.source_cpu_cores == 0 {
        return Err(CapacityError::no_baseline(
            target.category,
            format!(
                "best baseline for '{}' has no measurable throughput per core",
                basis.component
            ),
        ));
    }

    let required_cpu_cores = ceil_count(target.throughput / basis.throughput_per_core)
        .ok_or_else(|| {
            CapacityError::InvalidTarget(format!(
                "throughput {} needs more cores than can be represented",
                target.throughput
            ))
        })?;

    let memory_per_core = basis.memory_per_core_gb();
    let required_memory_gb = ceil_count(required_cpu_cores as f64 * memory_per_core)
        .ok_or_else(|| {
            CapacityError::InvalidTarget(format!(
                "{} cores at {:.2} GB per core needs more memory than can be represented",
                required_cpu_cores, memory_per_core
            ))
        })?;

    Ok(CapacityRecommendation {
        category: target.category,
        required_cpu_cores,
        required_memory_gb,
        estimated_latency_ms: basis.latency_ms,
        latency_bound_met: basis.latency_ms <= target.max_latency_ms,
        baseline: BaselineMetrics::from(basis),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentCategory;

    fn baseline(category: ComponentCategory, per_core: f64, cores: u32, memory_gb: f64, latency: f64) -> NormalizedBaseline {
        NormalizedBaseline {
            component: "KingbaseES".to_string(),
            category,
            throughput_per_core: per_core,
            throughput_per_gb: per_core * cores as f64 / memory_gb,
            latency_ms: latency,
            cpu_utilization_pct: 65.0,
            memory_utilization_pct: 30.0,
            memory_used_gb: 1.2,
            source_cpu_cores: cores,
            source_memory_gb: memory_gb,
        }
    }

    fn db_target(throughput: f64, max_latency_ms: f64) -> TargetSlo {
        TargetSlo::new(ComponentCategory::Db, throughput, max_latency_ms)
    }

    #[test]
    fn test_exact_division() {
        let baselines = vec![baseline(ComponentCategory::Db, 250.0, 4, 4.0, 80.0)];
        let rec = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 4);
        assert_eq!(rec.required_memory_gb, 4);
        assert_eq!(rec.estimated_latency_ms, 80.0);
        assert!(rec.latency_bound_met);
        assert_eq!(rec.baseline.throughput_per_core, 250.0);
    }

    #[test]
    fn test_cores_use_ceiling() {
        let baselines = vec![baseline(ComponentCategory::Db, 250.0, 4, 4.0, 80.0)];
        let rec = extrapolate(&baselines, &db_target(1200.0, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 5);
        assert_eq!(rec.required_memory_gb, 5);
    }

    #[test]
    fn test_memory_follows_core_ratio() {
        // 2 GB per core in the test environment
        let baselines = vec![baseline(ComponentCategory::Db, 100.0, 4, 8.0, 10.0)];
        let rec = extrapolate(&baselines, &db_target(250.0, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 3);
        assert_eq!(rec.required_memory_gb, 6);
    }

    #[test]
    fn test_memory_floored_at_one_gb() {
        let baselines = vec![baseline(ComponentCategory::Db, 1000.0, 8, 1.0, 10.0)];
        let rec = extrapolate(&baselines, &db_target(10.0, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 1);
        assert_eq!(rec.required_memory_gb, 1);
    }

    #[test]
    fn test_most_efficient_baseline_chosen() {
        let baselines = vec![
            baseline(ComponentCategory::Db, 10.0, 4, 4.0, 5.0),
            baseline(ComponentCategory::Db, 20.0, 4, 4.0, 9.0),
        ];
        let rec = extrapolate(&baselines, &db_target(100.0, 100.0)).unwrap();
        assert_eq!(rec.baseline.throughput_per_core, 20.0);
        assert_eq!(rec.required_cpu_cores, 5);
        assert_eq!(rec.estimated_latency_ms, 9.0);
    }

    #[test]
    fn test_ties_keep_first() {
        let mut first = baseline(ComponentCategory::Db, 20.0, 4, 4.0, 5.0);
        first.component = "first".to_string();
        let mut second = baseline(ComponentCategory::Db, 20.0, 4, 4.0, 9.0);
        second.component = "second".to_string();
        let baselines = vec![first, second];
        let basis = select_basis(&baselines, &db_target(100.0, 100.0)).unwrap();
        assert_eq!(basis.component, "first");
    }

    #[test]
    fn test_non_finite_baselines_skipped() {
        let baselines = vec![
            baseline(ComponentCategory::Db, f64::NAN, 4, 4.0, 5.0),
            baseline(ComponentCategory::Db, 250.0, 4, 4.0, 80.0),
            baseline(ComponentCategory::Db, f64::INFINITY, 4, 4.0, 5.0),
        ];
        let rec = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap();
        assert_eq!(rec.baseline.throughput_per_core, 250.0);
        assert_eq!(rec.required_cpu_cores, 4);
    }

    #[test]
    fn test_small_excess_over_capacity_adds_a_core() {
        let baselines = vec![baseline(ComponentCategory::Db, 250.0, 4, 4.0, 80.0)];
        let rec = extrapolate(&baselines, &db_target(1000.0000005, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 5);
    }

    #[test]
    fn test_other_category_ignored() {
        let baselines = vec![
            baseline(ComponentCategory::Mq, 5000.0, 4, 4.0, 5.0),
            baseline(ComponentCategory::Db, 100.0, 4, 4.0, 20.0),
        ];
        let rec = extrapolate(&baselines, &db_target(400.0, 100.0)).unwrap();
        assert_eq!(rec.category, ComponentCategory::Db);
        assert_eq!(rec.required_cpu_cores, 4);
    }

    #[test]
    fn test_latency_bound_not_met_still_returns() {
        let baselines = vec![baseline(ComponentCategory::Db, 250.0, 4, 4.0, 150.0)];
        let rec = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap();
        assert_eq!(rec.required_cpu_cores, 4);
        assert!(!rec.latency_bound_met);
        assert_eq!(rec.estimated_latency_ms, 150.0);
    }

    #[test]
    fn test_latency_equal_to_bound_is_met() {
        let baselines = vec![baseline(ComponentCategory::Db, 250.0, 4, 4.0, 100.0)];
        let rec = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap();
        assert!(rec.latency_bound_met);
    }

    #[test]
    fn test_no_baseline_for_category() {
        let baselines = vec![baseline(ComponentCategory::Mq, 5000.0, 4, 4.0, 5.0)];
        let err = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap_err();
        assert!(err.is_no_data());
        assert!(extrapolate(&[], &db_target(1000.0, 100.0)).unwrap_err().is_no_data());
    }

    #[test]
    fn test_zero_throughput_basis_is_not_feasible() {
        let baselines = vec![baseline(ComponentCategory::Db, 0.0, 4, 4.0, 5.0)];
        let err = extrapolate(&baselines, &db_target(1000.0, 100.0)).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_invalid_target_rejected_first() {
        for target in [
            db_target(0.0, 100.0),
            db_target(-5.0, 100.0),
            db_target(100.0, 0.0),
            db_target(f64::NAN, 100.0),
            db_target(100.0, f64::INFINITY),
        ] {
            // Rejected even with no baselines available
            let err = extrapolate(&[], &target).unwrap_err();
            assert!(matches!(err, CapacityError::InvalidTarget(_)), "{:?}", target);
        }
    }

    #[test]
    fn test_unrepresentable_core_count() {
        let baselines = vec![baseline(ComponentCategory::Db, 1e-6, 4, 4.0, 5.0)];
        let err = extrapolate(&baselines, &db_target(1e9, 100.0)).unwrap_err();
        assert!(matches!(err, CapacityError::InvalidTarget(_)));
    }

    #[test]
    fn test_cores_monotonic_in_throughput() {
        let baselines = vec![baseline(ComponentCategory::Db, 333.0, 4, 6.0, 5.0)];
        let mut previous = 0;
        for throughput in [1.0, 50.0, 333.0, 334.0, 1000.0, 2000.0, 4000.0, 8000.0] {
            let rec = extrapolate(&baselines, &db_target(throughput, 100.0)).unwrap();
            assert!(rec.required_cpu_cores >= previous);
            assert!(rec.required_cpu_cores >= 1);
            assert!(rec.required_memory_gb >= 1);
            previous = rec.required_cpu_cores;
        }
    }
}
