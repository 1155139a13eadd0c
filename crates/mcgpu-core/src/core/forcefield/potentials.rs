use crate::core::models::Real;

const COULOMB_CONSTANT: Real = 332.0637; // In kcal·Å/(mol·e²)

#[inline]
pub fn lennard_jones_12_6(dist: Real, sigma: Real, epsilon: Real) -> Real {
    if epsilon <= 0.0 || sigma <= 0.0 {
        return 0.0;
    }
    if dist < 1e-6 {
        return 1e10;
    }
    let sr6 = (sigma / dist).powi(6);
    4.0 * epsilon * (sr6 * sr6 - sr6)
}

#[inline]
pub fn coulomb(dist: Real, q1: Real, q2: Real) -> Real {
    if q1 == 0.0 || q2 == 0.0 {
        return 0.0;
    }
    if dist < 1e-6 {
        return q1.signum() * q2.signum() * 1e10;
    }
    COULOMB_CONSTANT * q1 * q2 / dist
}

/// Geometric-mean combining rule used for both sigma and epsilon.
#[inline]
pub fn geometric_mean(a: Real, b: Real) -> Real {
    (a * b).sqrt()
}
