//! Energy evaluation backends.
//!
//! A backend answers two questions about a [`SimBox`]: the total interaction energy of
//! the system and the share of it involving a single molecule. Both backends return
//! the same values for the same box; they differ only in how the work is scheduled.

mod parallel;
mod serial;

pub use parallel::ParallelBackend;
pub use serial::SerialBackend;

use super::config::{InputFileType, SimulationMode};
use super::error::EngineError;
use super::sim_box::{BoxSetup, SimBox};
use crate::core::forcefield::term::EnergyTerm;
use crate::core::io::input::InputConfig;
use crate::core::io::state::StateFile;
use crate::core::models::Real;
use std::path::Path;
use tracing::info;

pub trait EnergyBackend: Send + Sync {
    fn mode(&self) -> SimulationMode;

    /// Total interaction energy of the box, split by term.
    fn system_energy_terms(&self, sim_box: &SimBox) -> EnergyTerm;

    /// Interactions between molecule `index` and every other molecule, split by term.
    fn contribution_terms(&self, sim_box: &SimBox, index: usize) -> EnergyTerm;

    fn system_energy(&self, sim_box: &SimBox) -> Real {
        self.system_energy_terms(sim_box).total()
    }

    fn molecular_energy_contribution(&self, sim_box: &SimBox, index: usize) -> Real {
        self.contribution_terms(sim_box, index).total()
    }

    /// Builds the simulation box from an input file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Initialization`] if the file cannot be read or does not
    /// describe a valid system.
    fn create_box(&self, path: &Path, file_type: InputFileType) -> Result<BoxSetup, EngineError> {
        load_box(path, file_type)
    }
}

pub fn backend_for(mode: SimulationMode) -> Box<dyn EnergyBackend> {
    match mode {
        SimulationMode::Serial => Box::new(SerialBackend),
        SimulationMode::Parallel => Box::new(ParallelBackend),
    }
}

/// Reads a configuration or state file into a [`BoxSetup`].
///
/// A configuration starts at step 0 and a state file resumes at its recorded step.
/// Either way the step count is the one stored in the environment.
pub fn load_box(path: &Path, file_type: InputFileType) -> Result<BoxSetup, EngineError> {
    match file_type {
        InputFileType::Config => {
            let config = InputConfig::from_file(path).map_err(|e| {
                EngineError::Initialization(format!(
                    "could not load configuration '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let system = config.build();
            info!(
                "Built {} molecules from configuration '{}'.",
                system.molecules.len(),
                path.display()
            );
            let sim_steps = system.environment.steps;
            Ok(BoxSetup {
                sim_box: SimBox::new(system.environment, system.molecules)?,
                step_start: 0,
                sim_steps,
            })
        }
        InputFileType::State => {
            let state = StateFile::read_from_path(path).map_err(|e| {
                EngineError::Initialization(format!(
                    "could not load state file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!(
                "Resuming {} molecules from state file '{}' at step {}.",
                state.molecules.len(),
                path.display(),
                state.step
            );
            let sim_steps = state.environment.steps;
            Ok(BoxSetup {
                sim_box: SimBox::new(state.environment, state.molecules)?,
                step_start: state.step,
                sim_steps,
            })
        }
    }
}
