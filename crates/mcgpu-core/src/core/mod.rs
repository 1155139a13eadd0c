//! # Core Module
//!
//! Fundamental building blocks for Monte Carlo simulation of molecular systems.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, molecules and the simulation environment
//! - **Energy Calculations** ([`forcefield`]) - Non-bonded potentials and the molecule-pair kernel
//! - **File I/O** ([`io`]) - Input configuration, state checkpoints, PDB and results files

pub mod forcefield;
pub mod io;
pub mod models;
