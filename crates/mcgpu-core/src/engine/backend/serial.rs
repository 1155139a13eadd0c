use super::EnergyBackend;
use crate::core::forcefield::energy::EnergyCalculator;
use crate::core::forcefield::term::EnergyTerm;
use crate::engine::config::SimulationMode;
use crate::engine::sim_box::SimBox;
use tracing::instrument;

/// Evaluates every interaction on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialBackend;

impl EnergyBackend for SerialBackend {
    fn mode(&self) -> SimulationMode {
        SimulationMode::Serial
    }

    #[instrument(level = "debug", skip_all, name = "serial_system_energy")]
    fn system_energy_terms(&self, sim_box: &SimBox) -> EnergyTerm {
        let molecules = sim_box.molecules();
        let environment = sim_box.environment();
        (0..molecules.len())
            .map(|index| EnergyCalculator::upper_row(molecules, environment, index))
            .sum()
    }

    fn contribution_terms(&self, sim_box: &SimBox, index: usize) -> EnergyTerm {
        EnergyCalculator::contribution(sim_box.molecules(), sim_box.environment(), index)
    }
}
