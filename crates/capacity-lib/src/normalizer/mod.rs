//! Benchmark normalization
//!
//! Turns raw benchmark rows into typed records and records into per-core /
//! per-GB baselines. Malformed rows are dropped, never reported as errors,
//! so one bad row cannot abort a batch.

mod fields;
mod normalize;

pub use fields::{FieldSelector, RawBenchmarkRow};
pub use normalize::{matches_component, normalize, normalize_record, normalize_rows};
