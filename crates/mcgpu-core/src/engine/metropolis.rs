use crate::core::models::Real;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Metropolis acceptance test for a move that changes a molecule's energy
/// contribution from `old` to `new`.
///
/// Downhill moves are accepted without touching `rng`. Otherwise one uniform draw
/// `u` is taken and the move is accepted when `exp(-(new - old) / kt) >= u`.
pub fn decide(old: Real, new: Real, kt: Real, rng: &mut impl Rng) -> Decision {
    if new < old {
        return Decision::Accept;
    }

    let probability = (-(new - old) / kt).exp();
    let draw: Real = rng.r#gen();
    if probability >= draw {
        Decision::Accept
    } else {
        Decision::Reject
    }
}
