//! # Core Models Module
//!
//! Data structures describing the simulated system.
//!
//! - [`atom`] - A single interaction site with position and non-bonded parameters
//! - [`molecule`] - A rigid group of atoms moved as one unit
//! - [`environment`] - Simulation-wide parameters: box, temperature, cutoff, seed
//!
//! All floating-point quantities use the crate-wide [`Real`] alias so that energies,
//! coordinates and temperatures share one precision.

pub mod atom;
pub mod environment;
pub mod molecule;

/// Floating-point type used for every coordinate, energy and temperature.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// Floating-point type used for every coordinate, energy and temperature.
#[cfg(feature = "single-precision")]
pub type Real = f32;
