//! Capacity Extrapolation CLI
//!
//! Normalizes benchmark result tables and projects the CPU and memory a
//! component needs to meet a target throughput and latency.

mod commands;
mod config;
mod loader;
mod output;

use anyhow::Result;
use capacity_lib::{CapacityError, ComponentCategory, TargetSlo};
use clap::{Parser, Subcommand};
use commands::{capacity, evaluate, records};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Capacity Extrapolation CLI
#[derive(Parser)]
#[command(name = "capex")]
#[command(author, version, about = "Benchmark-based capacity extrapolation", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Emit logs as JSON (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Benchmark environment overrides shared by several commands
#[derive(clap::Args)]
pub struct EnvArgs {
    /// CPU cores of the benchmark environment (default: CAPEX_TEST_CPU_CORES or 4)
    #[arg(long)]
    pub test_cpu_cores: Option<u32>,

    /// Memory in GB of the benchmark environment (default: CAPEX_TEST_MEMORY_GB or 4.0)
    #[arg(long)]
    pub test_memory_gb: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project the CPU and memory needed for a target throughput
    Extrapolate {
        /// Benchmark table (JSON array of rows)
        #[arg(long)]
        file: PathBuf,

        /// Component type: DB or MQ
        #[arg(long = "type", short = 't')]
        category: ComponentCategory,

        /// Component name, matched case-insensitively
        #[arg(long, short)]
        component: String,

        /// Target throughput (TPS for DB, messages/sec for MQ)
        #[arg(long)]
        target: f64,

        /// Maximum latency in ms (average for DB, p95 for MQ)
        #[arg(long)]
        max_latency_ms: Option<f64>,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// Show the per-core / per-GB baselines of a benchmark table
    Normalize {
        /// Benchmark table (JSON array of rows)
        #[arg(long)]
        file: PathBuf,

        /// Component type: DB or MQ
        #[arg(long = "type", short = 't')]
        category: ComponentCategory,

        /// Component name, matched case-insensitively
        #[arg(long, short)]
        component: String,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// Show the best observed run of a benchmark table
    Summary {
        /// Benchmark table (JSON array of rows)
        #[arg(long)]
        file: PathBuf,

        /// Component type: DB or MQ
        #[arg(long = "type", short = 't')]
        category: ComponentCategory,

        /// Component name (defaults to the file name prefix)
        #[arg(long, short)]
        component: Option<String>,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// Find the best DB and MQ runs meeting latency and throughput bounds
    Fit {
        /// Database benchmark table
        #[arg(long)]
        db_file: Option<PathBuf>,

        /// Message queue benchmark table
        #[arg(long)]
        mq_file: Option<PathBuf>,

        /// Maximum response time in ms
        #[arg(long)]
        max_latency_ms: Option<f64>,

        /// Minimum throughput
        #[arg(long, default_value_t = 1000.0)]
        min_throughput: f64,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// List rows of a benchmark table as the engine reads them
    Records {
        /// Benchmark table (JSON array of rows)
        #[arg(long)]
        file: PathBuf,

        /// Component type: DB or MQ
        #[arg(long = "type", short = 't')]
        category: ComponentCategory,

        /// Only list rows of this component, matched case-insensitively
        #[arg(long, short)]
        component: Option<String>,

        /// Maximum rows to list (default: CAPEX_LIST_LIMIT or 100)
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        env: EnvArgs,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::PlannerConfig::load()?;

    match cli.command {
        Commands::Extrapolate {
            file,
            category,
            component,
            target,
            max_latency_ms,
            env,
        } => {
            let test_env = config.test_environment(env.test_cpu_cores, env.test_memory_gb)?;
            let slo = TargetSlo::new(
                category,
                target,
                max_latency_ms.unwrap_or(config.max_latency_ms),
            );
            capacity::extrapolate_capacity(&file, category, &component, &test_env, slo, cli.format)?;
        }
        Commands::Normalize {
            file,
            category,
            component,
            env,
        } => {
            let test_env = config.test_environment(env.test_cpu_cores, env.test_memory_gb)?;
            capacity::show_baselines(&file, category, &component, &test_env, cli.format)?;
        }
        Commands::Summary {
            file,
            category,
            component,
            env,
        } => {
            let test_env = config.test_environment(env.test_cpu_cores, env.test_memory_gb)?;
            evaluate::show_summary(&file, category, component, &test_env, cli.format)?;
        }
        Commands::Fit {
            db_file,
            mq_file,
            max_latency_ms,
            min_throughput,
            env,
        } => {
            let test_env = config.test_environment(env.test_cpu_cores, env.test_memory_gb)?;
            evaluate::show_fit(
                db_file.as_deref(),
                mq_file.as_deref(),
                max_latency_ms.unwrap_or(config.max_latency_ms),
                min_throughput,
                &test_env,
                cli.format,
            )?;
        }
        Commands::Records {
            file,
            category,
            component,
            limit,
            env,
        } => {
            let test_env = config.test_environment(env.test_cpu_cores, env.test_memory_gb)?;
            records::list_records(
                &file,
                category,
                component.as_deref(),
                &test_env,
                limit.unwrap_or(config.list_limit),
                cli.format,
            )?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<CapacityError>() {
            Some(capacity_err) if capacity_err.is_no_data() => {
                output::print_warning(&format!("No data available: {}", capacity_err));
                ExitCode::from(2)
            }
            _ => {
                output::print_error(&format!("{:#}", err));
                ExitCode::from(1)
            }
        },
    }
}
