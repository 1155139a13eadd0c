//! # Force Field Module
//!
//! Non-bonded interaction energies between rigid molecules.
//!
//! Molecules interact through Lennard-Jones 12-6 and Coulomb terms between all pairs of
//! their atoms. Whether two molecules interact at all is decided by the distance between
//! their primary atoms, measured under the periodic minimum-image convention, against the
//! environment's cutoff.
//!
//! ## Key Components
//!
//! - [`potentials`] - Scalar pair potentials and combining rules
//! - [`term`] - Per-component energy accumulation
//! - [`energy`] - The molecule-pair kernel shared by every energy backend

pub mod energy;
pub(crate) mod potentials;
pub mod term;
