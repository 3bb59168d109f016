//! Benchmark table loading
//!
//! A table is a JSON array of row objects whose keys are the benchmark
//! tool's column names. Paths are always given explicitly.

use anyhow::{Context, Result};
use capacity_lib::{BenchmarkRecord, ComponentCategory, RawBenchmarkRow, TestEnvironment};
use std::path::Path;

/// Read every row of a benchmark table
pub fn load_rows(path: &Path) -> Result<Vec<RawBenchmarkRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read benchmark table {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse benchmark table {}", path.display()))
}

/// Rows converted to records; malformed rows are skipped
pub fn load_records(
    path: &Path,
    category: ComponentCategory,
    env: &TestEnvironment,
    component: &str,
) -> Result<Vec<BenchmarkRecord>> {
    Ok(load_rows(path)?
        .iter()
        .filter_map(|row| row.into_record(category, env, component).ok())
        .collect())
}

/// Component name encoded in a result file name, e.g.
/// `KingbaseES_kbbench_results_20240101.json` -> `KingbaseES`
pub fn component_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    match stem.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_component_from_path() {
        assert_eq!(
            component_from_path(Path::new("datas/KingbaseES_kbbench_results_1.json")),
            "KingbaseES"
        );
        assert_eq!(
            component_from_path(Path::new("RabbitMQ_perftest_summary_2.json")),
            "RabbitMQ"
        );
        assert_eq!(component_from_path(Path::new("results.json")), "Unknown");
    }

    #[test]
    fn test_load_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"tps_excluding": 100.0, "latency_ms_avg": 5.0, "return_code": 0}}]"#
        )
        .unwrap();
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tps_excluding, Some(100.0));
    }

    #[test]
    fn test_load_rows_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_rows(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
