use super::potentials;
use super::term::EnergyTerm;
use crate::core::models::Real;
use crate::core::models::environment::Environment;
use crate::core::models::molecule::Molecule;
use nalgebra::Vector3;

/// Periodic image offset for a displacement `delta` in an orthorhombic box.
///
/// Subtracting the returned vector from `delta` yields the minimum-image displacement.
/// Axes with a non-positive length are treated as non-periodic.
#[inline]
pub fn minimum_image_shift(delta: &Vector3<Real>, dimensions: &[Real; 3]) -> Vector3<Real> {
    let mut shift = Vector3::zeros();
    for axis in 0..3 {
        let length = dimensions[axis];
        if length > 0.0 {
            shift[axis] = length * (delta[axis] / length).round();
        }
    }
    shift
}

pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Interaction energy between two distinct molecules.
    ///
    /// The primary atoms decide both the cutoff and the periodic image: when their
    /// minimum-image distance is at or beyond the cutoff the molecules do not interact,
    /// otherwise every atom pair is evaluated using the same image of `b`.
    pub fn molecule_pair(a: &Molecule, b: &Molecule, environment: &Environment) -> EnergyTerm {
        let primary = environment.primary_atom_index;
        let (Some(pivot_a), Some(pivot_b)) = (a.pivot(primary), b.pivot(primary)) else {
            return EnergyTerm::default();
        };

        let delta = pivot_a - pivot_b;
        let shift = minimum_image_shift(&delta, &environment.dimensions);
        let cutoff_sq = environment.cutoff * environment.cutoff;
        if (delta - shift).norm_squared() >= cutoff_sq {
            return EnergyTerm::default();
        }

        let mut energy = EnergyTerm::default();
        for atom_a in &a.atoms {
            for atom_b in &b.atoms {
                let dist = ((atom_a.position - atom_b.position) - shift).norm();

                energy.lennard_jones += potentials::lennard_jones_12_6(
                    dist,
                    potentials::geometric_mean(atom_a.sigma, atom_b.sigma),
                    potentials::geometric_mean(atom_a.epsilon, atom_b.epsilon),
                );
                energy.coulomb += potentials::coulomb(dist, atom_a.charge, atom_b.charge);
            }
        }
        energy
    }

    /// Sum of the interactions of molecule `index` with every other molecule, in index order.
    pub fn contribution(
        molecules: &[Molecule],
        environment: &Environment,
        index: usize,
    ) -> EnergyTerm {
        let Some(target) = molecules.get(index) else {
            return EnergyTerm::default();
        };

        molecules
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, molecule)| Self::molecule_pair(target, molecule, environment))
            .sum()
    }

    /// Interactions of molecule `index` with every molecule after it.
    ///
    /// Summing these rows over all indices counts every pair exactly once.
    pub fn upper_row(
        molecules: &[Molecule],
        environment: &Environment,
        index: usize,
    ) -> EnergyTerm {
        let Some(target) = molecules.get(index) else {
            return EnergyTerm::default();
        };

        molecules[index + 1..]
            .iter()
            .map(|molecule| Self::molecule_pair(target, molecule, environment))
            .sum()
    }
}
