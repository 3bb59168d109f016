//! Capacity extrapolation
//!
//! Projects the smallest whole CPU / memory allocation expected to carry a
//! target throughput, scaling linearly from the most efficient baseline.
//! Linear scaling is an approximation that only holds inside the range the
//! benchmarks covered.

mod extrapolate;

pub use extrapolate::{extrapolate, select_basis, validate_target};
