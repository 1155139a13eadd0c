use super::Real;
use super::atom::Atom;
use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid molecule: an identifier and an ordered list of atoms.
///
/// Rigid-body moves (translation, rotation about a pivot atom) are the only
/// mutations a molecule undergoes during a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub id: usize,
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(id: usize, atoms: Vec<Atom>) -> Self {
        Self { id, atoms }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the position of the atom at `index`, falling back to the first atom
    /// when the index is out of range.
    ///
    /// Returns `None` only for a molecule without atoms.
    pub fn pivot(&self, index: usize) -> Option<Point3<Real>> {
        self.atoms
            .get(index)
            .or_else(|| self.atoms.first())
            .map(|atom| atom.position)
    }

    pub fn translate(&mut self, shift: &Vector3<Real>) {
        for atom in &mut self.atoms {
            atom.position += shift;
        }
    }

    /// Rotates every atom of the molecule about `pivot`.
    pub fn rotate_about(&mut self, pivot: &Point3<Real>, rotation: &Rotation3<Real>) {
        for atom in &mut self.atoms {
            let relative = atom.position - pivot;
            atom.position = pivot + rotation * relative;
        }
    }

    /// Shifts the whole molecule by whole box lengths so that the pivot atom lies
    /// inside `[0, dimensions)` on every axis.
    pub fn wrap_into_box(&mut self, pivot_index: usize, dimensions: &[Real; 3]) {
        let Some(pivot) = self.pivot(pivot_index) else {
            return;
        };

        let mut shift = Vector3::zeros();
        let mut wrapped = pivot;
        for axis in 0..3 {
            let length = dimensions[axis];
            if length <= 0.0 || (0.0..length).contains(&pivot[axis]) {
                continue;
            }
            // rem_euclid rounds up to `length` for tiny negative coordinates.
            let mut coordinate = pivot[axis].rem_euclid(length);
            if coordinate >= length {
                coordinate = 0.0;
            }
            shift[axis] = coordinate - pivot[axis];
            wrapped[axis] = coordinate;
        }

        if shift != Vector3::zeros() {
            self.translate(&shift);
            let slot = if pivot_index < self.atoms.len() {
                pivot_index
            } else {
                0
            };
            self.atoms[slot].position = wrapped;
        }
    }
}
