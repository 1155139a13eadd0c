use super::Real;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Represents a single interaction site of a molecule.
///
/// Atoms carry their own non-bonded parameters so that the energy kernels never
/// need to look anything up while iterating over atom pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// The system-wide atom identifier (zero-based).
    pub id: usize,
    /// The name of the atom (e.g., "O", "H1").
    pub name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<Real>,
    /// Lennard-Jones collision diameter in Angstroms.
    pub sigma: Real,
    /// Lennard-Jones well depth in kcal/mol.
    pub epsilon: Real,
    /// Partial charge in elementary charge units.
    pub charge: Real,
}

impl Atom {
    /// Creates a new `Atom` with zeroed non-bonded parameters.
    ///
    /// # Arguments
    ///
    /// * `id` - The system-wide atom identifier.
    /// * `name` - The name of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(id: usize, name: &str, position: Point3<Real>) -> Self {
        Self {
            id,
            name: name.to_string(),
            position,
            sigma: 0.0,
            epsilon: 0.0,
            charge: 0.0,
        }
    }

    /// Sets the Lennard-Jones and Coulomb parameters of the atom.
    pub fn with_params(mut self, sigma: Real, epsilon: Real, charge: Real) -> Self {
        self.sigma = sigma;
        self.epsilon = epsilon;
        self.charge = charge;
        self
    }
}
