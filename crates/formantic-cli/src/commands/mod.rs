//! CLI command implementations

pub mod batch;
pub mod json_output;
pub mod sample;
pub mod synth;
pub mod validate_table;

mod reporting;
