//! CLI command implementations

pub mod capacity;
pub mod evaluate;
pub mod records;
