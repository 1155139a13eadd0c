use super::EnergyBackend;
use crate::core::forcefield::energy::EnergyCalculator;
use crate::core::forcefield::term::EnergyTerm;
use crate::engine::config::SimulationMode;
use crate::engine::sim_box::SimBox;
use rayon::prelude::*;
use tracing::instrument;

/// Evaluates interactions on the rayon thread pool.
///
/// Per-molecule terms are computed in parallel and then summed on the calling thread in
/// molecule order, so results do not depend on scheduling and match [`super::SerialBackend`]
/// exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelBackend;

impl EnergyBackend for ParallelBackend {
    fn mode(&self) -> SimulationMode {
        SimulationMode::Parallel
    }

    #[instrument(level = "debug", skip_all, name = "parallel_system_energy")]
    fn system_energy_terms(&self, sim_box: &SimBox) -> EnergyTerm {
        let molecules = sim_box.molecules();
        let environment = sim_box.environment();
        let rows: Vec<EnergyTerm> = (0..molecules.len())
            .into_par_iter()
            .map(|index| EnergyCalculator::upper_row(molecules, environment, index))
            .collect();
        rows.into_iter().sum()
    }

    fn contribution_terms(&self, sim_box: &SimBox, index: usize) -> EnergyTerm {
        let molecules = sim_box.molecules();
        let environment = sim_box.environment();
        let Some(target) = molecules.get(index) else {
            return EnergyTerm::default();
        };

        let pairs: Vec<EnergyTerm> = molecules
            .par_iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, molecule)| EnergyCalculator::molecule_pair(target, molecule, environment))
            .collect();
        pairs.into_iter().sum()
    }
}
