use crate::core::models::Real;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub lennard_jones: Real,
    pub coulomb: Real,
}

impl EnergyTerm {
    pub fn new(lennard_jones: Real, coulomb: Real) -> Self {
        Self {
            lennard_jones,
            coulomb,
        }
    }

    #[inline]
    pub fn total(&self) -> Real {
        self.lennard_jones + self.coulomb
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            lennard_jones: self.lennard_jones + rhs.lennard_jones,
            coulomb: self.coulomb + rhs.coulomb,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.lennard_jones += rhs.lennard_jones;
        self.coulomb += rhs.coulomb;
    }
}

impl Sum for EnergyTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
