//! Formantic CLI library.
//!
//! This crate provides the command implementations behind the `formantic`
//! binary: table and request loading plus the `synth`, `validate-table`,
//! `sample`, and `batch` commands.

pub mod commands;
pub mod input;
