//! Capacity planning library for benchmarked middleware components
//!
//! This crate provides the core functionality for:
//! - Converting raw benchmark tables into typed records
//! - Normalizing records into per-core / per-GB baselines
//! - Extrapolating the CPU and memory needed to meet a target SLO
//! - Summarizing the best observed run and SLO-fit lookups
//!
//! Every engine entry point is a pure function of its inputs.

pub mod error;
pub mod evaluation;
pub mod extrapolator;
pub mod models;
pub mod normalizer;
pub mod observability;
pub mod report;
mod validate;

pub use error::{CapacityError, Result};
pub use evaluation::{best_fit, summarize, task_fit, PerformanceSummary, TaskConstraints, TaskFit};
pub use extrapolator::extrapolate;
pub use models::*;
pub use normalizer::{normalize, normalize_rows, FieldSelector, RawBenchmarkRow};
pub use observability::StructuredLogger;
pub use report::{BaselineMetricsReport, CapacityReport, RecommendationReport};
