use super::error::EngineError;
use crate::core::io::traits::SystemSnapshot;
use crate::core::models::Real;
use crate::core::models::environment::Environment;
use crate::core::models::molecule::Molecule;
use nalgebra::{Rotation3, Vector3};
use rand::Rng;

/// A proposed rigid-body move of one molecule.
///
/// Holds the molecule as it was before the move. Passing the change to
/// [`SimBox::commit`] keeps the move; [`SimBox::rollback`] restores the snapshot.
#[derive(Debug)]
#[must_use = "a change must be committed or rolled back"]
pub struct MoleculeChange {
    index: usize,
    previous: Molecule,
}

impl MoleculeChange {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn previous(&self) -> &Molecule {
        &self.previous
    }
}

/// The periodic simulation box: environment plus every molecule.
#[derive(Debug, Clone)]
pub struct SimBox {
    environment: Environment,
    molecules: Vec<Molecule>,
}

/// A box produced by a backend's box factory, with the step window to simulate.
#[derive(Debug, Clone)]
pub struct BoxSetup {
    pub sim_box: SimBox,
    pub step_start: u64,
    pub sim_steps: u64,
}

impl SimBox {
    pub fn new(environment: Environment, molecules: Vec<Molecule>) -> Result<Self, EngineError> {
        if molecules.is_empty() {
            return Err(EngineError::Initialization(
                "the simulation box contains no molecules".to_string(),
            ));
        }
        if let Some(molecule) = molecules.iter().find(|m| m.atoms.is_empty()) {
            return Err(EngineError::Initialization(format!(
                "molecule {} has no atoms",
                molecule.id
            )));
        }
        if environment.molecule_count != molecules.len() {
            return Err(EngineError::Initialization(format!(
                "environment declares {} molecules but {} were supplied",
                environment.molecule_count,
                molecules.len()
            )));
        }
        Ok(Self {
            environment,
            molecules,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    pub fn snapshot(&self, step: u64) -> SystemSnapshot<'_> {
        SystemSnapshot {
            environment: &self.environment,
            molecules: &self.molecules,
            step,
        }
    }

    /// Picks a molecule uniformly at random.
    pub fn choose_molecule(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.molecules.len())
    }

    /// Applies a random translation and a random rotation about the primary atom to
    /// molecule `index`, then wraps it back into the box by its primary atom.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn change_molecule(&mut self, index: usize, rng: &mut impl Rng) -> MoleculeChange {
        let environment = &self.environment;
        let molecule = &mut self.molecules[index];
        let previous = molecule.clone();

        let max_translation = environment.max_translation;
        let shift = Vector3::new(
            symmetric_draw(rng, max_translation),
            symmetric_draw(rng, max_translation),
            symmetric_draw(rng, max_translation),
        );
        let max_rotation = environment.max_rotation.to_radians();
        let rotation = Rotation3::from_euler_angles(
            symmetric_draw(rng, max_rotation),
            symmetric_draw(rng, max_rotation),
            symmetric_draw(rng, max_rotation),
        );

        let primary = environment.primary_atom_index;
        molecule.translate(&shift);
        if let Some(pivot) = molecule.pivot(primary) {
            molecule.rotate_about(&pivot, &rotation);
        }
        molecule.wrap_into_box(primary, &environment.dimensions);

        MoleculeChange { index, previous }
    }

    pub fn commit(&mut self, change: MoleculeChange) {
        drop(change);
    }

    /// Restores the molecule to its state before `change` was proposed.
    pub fn rollback(&mut self, change: MoleculeChange) {
        self.molecules[change.index] = change.previous;
    }
}

/// Uniform draw from `[-bound, bound)`, or zero when the bound is not positive.
fn symmetric_draw(rng: &mut impl Rng, bound: Real) -> Real {
    if bound > 0.0 {
        rng.gen_range(-bound..bound)
    } else {
        0.0
    }
}
