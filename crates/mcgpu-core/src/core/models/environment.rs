use super::Real;
use serde::{Deserialize, Serialize};

/// Boltzmann constant in kcal/(mol·K).
pub const K_BOLTZMANN: Real = 1.987206504191549e-3;

/// Simulation-wide parameters shared by every molecule in the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Environment {
    /// Orthorhombic box edge lengths (x, y, z) in Angstroms.
    pub dimensions: [Real; 3],
    /// Temperature in Kelvin.
    pub temperature: Real,
    /// Primary-atom distance beyond which two molecules do not interact, in Angstroms.
    pub cutoff: Real,
    /// Largest displacement along each axis for a single move, in Angstroms.
    pub max_translation: Real,
    /// Largest rotation about each axis for a single move, in degrees.
    pub max_rotation: Real,
    /// Number of Monte Carlo steps a run performs unless overridden.
    #[serde(default)]
    pub steps: u64,
    /// Seed of the simulation's random stream.
    pub random_seed: u64,
    pub molecule_count: usize,
    /// Index (within each molecule) of the atom used for cutoff tests, periodic
    /// imaging and as the rotation pivot.
    pub primary_atom_index: usize,
}

impl Environment {
    /// Thermal energy `k_B * T` in kcal/mol.
    pub fn kt(&self) -> Real {
        K_BOLTZMANN * self.temperature
    }
}
