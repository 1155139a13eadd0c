//! # Engine Module
//!
//! The stateful layer of a simulation run.
//!
//! - [`sim_box`] - Owns the molecules and implements propose/commit/rollback moves
//! - [`backend`] - Interchangeable energy evaluators behind the [`backend::EnergyBackend`] trait
//! - [`metropolis`] - The acceptance test applied to every proposal
//! - [`driver`] - The step loop sequencing proposals, energy queries and checkpoints
//! - [`config`] - Run arguments and their builder
//! - [`progress`] - Callback protocol used to observe a running simulation

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod metropolis;
pub mod progress;
pub mod sim_box;
pub mod stats;
