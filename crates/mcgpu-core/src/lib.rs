//! # MCGPU Core Library
//!
//! A Metropolis Monte Carlo engine for systems of rigid molecules in a periodic box.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Plain data models (`Atom`, `Molecule`, `Environment`),
//!   the pairwise interaction potentials, and the file formats read and written by a run
//!   (input configuration, state checkpoints, PDB coordinates, results records).
//!
//! - **[`engine`]: The Logic Core.** The stateful layer that owns a simulation: the
//!   simulation box and its perturbation/rollback protocol, the interchangeable energy
//!   backends (serial and parallel), the Metropolis acceptance test, and the driver that
//!   sequences proposals, energy queries and checkpoints.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie `engine` and `core`
//!   together, such as running a simulation end to end and persisting its artifacts.

pub mod core;
pub mod engine;
pub mod workflows;
