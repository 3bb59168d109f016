//! Planner configuration

use anyhow::{bail, Context, Result};
use capacity_lib::TestEnvironment;
use serde::Deserialize;

/// Defaults applied when a flag is not given, read from `CAPEX_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// CPU cores of the benchmark environment
    #[serde(default = "default_test_cpu_cores")]
    pub test_cpu_cores: u32,

    /// Memory (GB) of the benchmark environment
    #[serde(default = "default_test_memory_gb")]
    pub test_memory_gb: f64,

    /// Latency bound used when a target does not give one
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: f64,

    /// Maximum rows printed by `capex records`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_test_cpu_cores() -> u32 {
    4
}

fn default_test_memory_gb() -> f64 {
    4.0
}

fn default_max_latency_ms() -> f64 {
    1000.0
}

fn default_list_limit() -> usize {
    100
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            test_cpu_cores: default_test_cpu_cores(),
            test_memory_gb: default_test_memory_gb(),
            max_latency_ms: default_max_latency_ms(),
            list_limit: default_list_limit(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CAPEX").try_parsing(true))
            .build()
            .context("Failed to read CAPEX_* configuration")?;

        config
            .try_deserialize()
            .context("Invalid CAPEX_* configuration")
    }

    /// Benchmark environment, with flag overrides applied
    ///
    /// A zero core count or a non-positive memory size is rejected: it would
    /// exclude every row and look like missing data.
    pub fn test_environment(
        &self,
        cpu_cores: Option<u32>,
        memory_gb: Option<f64>,
    ) -> Result<TestEnvironment> {
        let env = TestEnvironment {
            cpu_cores: cpu_cores.unwrap_or(self.test_cpu_cores),
            memory_gb: memory_gb.unwrap_or(self.test_memory_gb),
        };
        if env.cpu_cores == 0 {
            bail!("test CPU cores must be at least 1");
        }
        if !(env.memory_gb.is_finite() && env.memory_gb > 0.0) {
            bail!("test memory must be a positive number of GB, got {}", env.memory_gb);
        }
        Ok(env)
    }
}
