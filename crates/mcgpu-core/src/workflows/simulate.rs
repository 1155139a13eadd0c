use crate::core::io::pdb::PdbFile;
use crate::core::io::results::{ResultsFile, RunRecord};
use crate::core::io::traits::SnapshotFile;
use crate::engine::config::SimulationArgs;
use crate::engine::driver::{Simulation, SimulationReport};
use crate::engine::error::{ArtifactKind, EngineError, OutputError};
use crate::engine::progress::{Progress, ProgressReporter};
use chrono::Local;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// A finished run together with the files it produced.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub report: SimulationReport,
    pub results_path: PathBuf,
    pub pdb_path: PathBuf,
    /// Failures across checkpoints, results and coordinates.
    pub output_errors: Vec<OutputError>,
}

impl SimulationOutcome {
    pub fn has_failures(&self) -> bool {
        !self.output_errors.is_empty()
    }
}

#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    args: SimulationArgs,
    reporter: &ProgressReporter,
) -> Result<SimulationOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Initialization",
    });
    let mut simulation = Simulation::new(args)?;
    reporter.report(Progress::PhaseFinish);

    let report = simulation.run(reporter);
    let mut output_errors = report.output_errors.clone();

    reporter.report(Progress::PhaseStart { name: "Output" });
    let args = simulation.args();
    let results_path = args.results_path();
    let record = run_record(&report);
    match ResultsFile::write_to_path(&record, &results_path) {
        Ok(()) => info!("Wrote results to '{}'.", results_path.display()),
        Err(e) => {
            let failure = OutputError::new(ArtifactKind::Results, results_path.clone(), &e);
            error!("{}", failure);
            output_errors.push(failure);
        }
    }

    let pdb_path = args.pdb_path();
    let final_step = report.step_start + report.steps;
    match PdbFile::write_to_path(&simulation.sim_box().snapshot(final_step), &pdb_path) {
        Ok(()) => info!("Wrote coordinates to '{}'.", pdb_path.display()),
        Err(e) => {
            let failure = OutputError::new(ArtifactKind::Coordinates, pdb_path.clone(), &e);
            error!("{}", failure);
            output_errors.push(failure);
        }
    }
    reporter.report(Progress::PhaseFinish);

    Ok(SimulationOutcome {
        report,
        results_path,
        pdb_path,
        output_errors,
    })
}

fn run_record(report: &SimulationReport) -> RunRecord {
    RunRecord {
        timestamp: Local::now(),
        simulation_name: report.simulation_name.clone(),
        mode_label: report.mode.label(),
        starting_step: report.step_start,
        steps: report.steps,
        molecule_count: report.molecule_count,
        final_energy: report.final_energy,
        run_time: report.run_time,
        accepted_moves: report.stats.accepted,
        rejected_moves: report.stats.rejected,
        acceptance_rate: report.acceptance_rate(),
    }
}
