//! # Workflows Module
//!
//! Top-level entry points that drive a complete run.
//!
//! - **Simulation Workflow** ([`simulate`]) - Loads the input, runs the Metropolis step
//!   loop with checkpointing, and writes the results and coordinate files.
//!
//! Workflows report progress through [`crate::engine::progress::ProgressReporter`] and
//! never abort because an output file could not be written; such failures are returned
//! in the report instead.

pub mod simulate;
