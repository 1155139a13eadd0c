use super::metropolis::Decision;
use crate::core::models::Real;

/// Accepted and rejected move counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub accepted: u64,
    pub rejected: u64,
}

impl RunStats {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Accept => self.accepted += 1,
            Decision::Reject => self.rejected += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.accepted + self.rejected
    }

    /// Accepted moves as a percentage of all moves; 0 when no move was made.
    pub fn acceptance_rate(&self) -> Real {
        match self.total() {
            0 => 0.0,
            total => 100.0 * self.accepted as Real / total as Real,
        }
    }
}
