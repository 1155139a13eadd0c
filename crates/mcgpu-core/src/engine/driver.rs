use super::backend::{EnergyBackend, backend_for};
use super::config::{SimulationArgs, SimulationMode};
use super::error::{ArtifactKind, EngineError, OutputError};
use super::metropolis::{self, Decision};
use super::progress::{Progress, ProgressReporter};
use super::sim_box::SimBox;
use super::stats::RunStats;
use crate::core::io::state::StateFile;
use crate::core::io::traits::SnapshotFile;
use crate::core::models::Real;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Number of steps folded into one progress increment.
const PROGRESS_BATCH: u64 = 1000;

/// Relative difference between the running and the recomputed energy above which a
/// resynchronization is reported as drift. Scales with the working precision.
fn drift_tolerance() -> Real {
    Real::EPSILON.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Stepping,
    Checkpointing,
    Finalizing,
    Done,
}

/// Outcome of one call to [`Simulation::run`].
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub simulation_name: Option<String>,
    pub mode: SimulationMode,
    pub step_start: u64,
    pub steps: u64,
    pub molecule_count: usize,
    pub initial_energy: Real,
    pub final_energy: Real,
    pub run_time: Duration,
    pub stats: RunStats,
    /// Checkpoints written successfully, in step order.
    pub checkpoints: Vec<PathBuf>,
    /// Every artifact that could not be written.
    pub output_errors: Vec<OutputError>,
}

impl SimulationReport {
    pub fn acceptance_rate(&self) -> Real {
        self.stats.acceptance_rate()
    }

    pub fn has_failures(&self) -> bool {
        !self.output_errors.is_empty()
    }

    pub fn failed_checkpoints(&self) -> usize {
        self.output_errors
            .iter()
            .filter(|failure| failure.kind == ArtifactKind::State)
            .count()
    }
}

/// A Metropolis Monte Carlo run over a single [`SimBox`].
pub struct Simulation {
    args: SimulationArgs,
    backend: Box<dyn EnergyBackend>,
    sim_box: SimBox,
    rng: ChaCha8Rng,
    step_start: u64,
    sim_steps: u64,
    phase: Phase,
}

impl Simulation {
    /// Loads the input named by `args` using the backend selected by `args.mode`.
    pub fn new(args: SimulationArgs) -> Result<Self, EngineError> {
        let backend = backend_for(args.mode);
        Self::with_backend(args, backend)
    }

    pub fn with_backend(
        args: SimulationArgs,
        backend: Box<dyn EnergyBackend>,
    ) -> Result<Self, EngineError> {
        info!(
            "Initializing {} simulation from '{}'.",
            backend.mode(),
            args.file_path.display()
        );
        let setup = backend.create_box(&args.file_path, args.file_type)?;

        let seed = setup.sim_box.environment().random_seed;
        info!("Using seed {}.", seed);

        let sim_steps = match args.step_count {
            Some(steps) if steps > 0 => steps,
            _ => setup.sim_steps,
        };

        Ok(Self {
            args,
            backend,
            sim_box: setup.sim_box,
            rng: ChaCha8Rng::seed_from_u64(seed),
            step_start: setup.step_start,
            sim_steps,
            phase: Phase::Ready,
        })
    }

    pub fn args(&self) -> &SimulationArgs {
        &self.args
    }

    pub fn sim_box(&self) -> &SimBox {
        &self.sim_box
    }

    pub fn backend(&self) -> &dyn EnergyBackend {
        self.backend.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step_start(&self) -> u64 {
        self.step_start
    }

    pub fn sim_steps(&self) -> u64 {
        self.sim_steps
    }

    /// Executes `sim_steps` Metropolis steps starting at `step_start`.
    ///
    /// Checkpoint failures are logged and recorded in the report; they never stop the
    /// run. On return the simulation's start step has advanced past the executed
    /// steps, so a further call continues where this one ended.
    #[instrument(skip_all, name = "simulation_run")]
    pub fn run(&mut self, reporter: &ProgressReporter) -> SimulationReport {
        let started = Instant::now();
        let step_start = self.step_start;
        let step_end = step_start + self.sim_steps;
        let kt = self.sim_box.environment().kt();

        let mut energy = self.backend.system_energy(&self.sim_box);
        let initial_energy = energy;
        let mut stats = RunStats::default();
        let mut checkpoints = Vec::new();
        let mut output_errors = Vec::new();

        info!(
            "Running {} steps ({} to {}) on {} molecules. Initial energy: {:.6}",
            self.sim_steps,
            step_start,
            step_end,
            self.sim_box.molecule_count(),
            energy
        );

        reporter.report(Progress::PhaseStart {
            name: "Monte Carlo",
        });
        reporter.report(Progress::Message(format!(
            "Using seed {}",
            self.sim_box.environment().random_seed
        )));
        reporter.report(Progress::TaskStart {
            total_steps: self.sim_steps,
        });
        self.phase = Phase::Stepping;

        let status_interval = self.args.status_interval;
        let state_interval = self.args.state_interval;
        let mut pending_progress = 0;

        for step in step_start..step_end {
            let offset = step - step_start;

            if status_interval > 0 && offset % status_interval == 0 {
                debug!("Step {}: energy {:.6}", step, energy);
                reporter.report(Progress::Status { step, energy });
            }

            if state_interval > 0 && offset > 0 && offset % state_interval as u64 == 0 {
                energy = self.resynchronize_energy(energy, step);
                self.checkpoint(step, reporter, &mut checkpoints, &mut output_errors);
            }

            let index = self.sim_box.choose_molecule(&mut self.rng);
            let old_contribution = self
                .backend
                .molecular_energy_contribution(&self.sim_box, index);
            let change = self.sim_box.change_molecule(index, &mut self.rng);
            let new_contribution = self
                .backend
                .molecular_energy_contribution(&self.sim_box, index);

            let decision =
                metropolis::decide(old_contribution, new_contribution, kt, &mut self.rng);
            stats.record(decision);
            match decision {
                Decision::Accept => {
                    energy += new_contribution - old_contribution;
                    self.sim_box.commit(change);
                }
                Decision::Reject => self.sim_box.rollback(change),
            }

            pending_progress += 1;
            if pending_progress == PROGRESS_BATCH {
                reporter.report(Progress::TaskIncrement {
                    amount: pending_progress,
                });
                pending_progress = 0;
            }
        }

        if pending_progress > 0 {
            reporter.report(Progress::TaskIncrement {
                amount: pending_progress,
            });
        }
        reporter.report(Progress::TaskFinish);

        self.phase = Phase::Finalizing;
        if state_interval >= 0 {
            self.checkpoint(step_end, reporter, &mut checkpoints, &mut output_errors);
        }
        self.phase = Phase::Done;
        reporter.report(Progress::PhaseFinish);

        let run_time = started.elapsed();
        info!(
            "Finished {} steps in {:.3} s: {} accepted, {} rejected ({:.2}%). Final energy: {:.6}",
            self.sim_steps,
            run_time.as_secs_f64(),
            stats.accepted,
            stats.rejected,
            stats.acceptance_rate(),
            energy
        );

        self.step_start = step_end;

        SimulationReport {
            simulation_name: self.args.simulation_name.clone(),
            mode: self.backend.mode(),
            step_start,
            steps: self.sim_steps,
            molecule_count: self.sim_box.molecule_count(),
            initial_energy,
            final_energy: energy,
            run_time,
            stats,
            checkpoints,
            output_errors,
        }
    }

    /// Recomputes the total energy and returns it in place of the running value.
    fn resynchronize_energy(&self, running: Real, step: u64) -> Real {
        let recomputed = self.backend.system_energy(&self.sim_box);
        let drift = (recomputed - running).abs();
        if drift > drift_tolerance() * recomputed.abs().max(1.0) {
            warn!(
                "Energy drift at step {}: running {:.6}, recomputed {:.6}.",
                step, running, recomputed
            );
        } else {
            debug!(
                "Energy resynchronized at step {} (drift {:.3e}).",
                step, drift
            );
        }
        recomputed
    }

    fn checkpoint(
        &mut self,
        step: u64,
        reporter: &ProgressReporter,
        written: &mut Vec<PathBuf>,
        failures: &mut Vec<OutputError>,
    ) {
        let previous_phase = self.phase;
        self.phase = Phase::Checkpointing;

        let path = self.args.state_path(step);
        match StateFile::write_to_path(&self.sim_box.snapshot(step), &path) {
            Ok(()) => {
                info!("Saved state at step {} to '{}'.", step, path.display());
                reporter.report(Progress::Checkpoint {
                    step,
                    path: path.clone(),
                });
                written.push(path);
            }
            Err(e) => {
                let failure = OutputError::new(ArtifactKind::State, path, &e);
                error!("{}", failure);
                failures.push(failure);
            }
        }

        self.phase = previous_phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::term::EnergyTerm;
    use crate::core::models::atom::Atom;
    use crate::core::models::environment::Environment;
    use crate::core::models::molecule::Molecule;
    use crate::engine::config::{InputFileType, SimulationArgsBuilder};
    use nalgebra::Point3;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    /// Writes a small argon-like system as a state file and returns its path.
    fn write_state(dir: &Path, step: u64, stored_steps: u64) -> PathBuf {
        let per_side = 3;
        let count = per_side * per_side * per_side;
        let environment = Environment {
            dimensions: [15.0, 15.0, 15.0],
            temperature: 120.0,
            cutoff: 7.0,
            max_translation: 0.3,
            max_rotation: 0.0,
            steps: stored_steps,
            random_seed: 2024,
            molecule_count: count,
            primary_atom_index: 0,
        };
        let molecules = (0..count)
            .map(|i| {
                let position = Point3::new(
                    (i % per_side) as Real * 5.0 + 2.5,
                    ((i / per_side) % per_side) as Real * 5.0 + 2.5,
                    (i / (per_side * per_side)) as Real * 5.0 + 2.5,
                );
                Molecule::new(
                    i,
                    vec![Atom::new(i, "Ar", position).with_params(3.4, 0.238, 0.0)],
                )
            })
            .collect::<Vec<_>>();
        let sim_box = SimBox::new(environment, molecules).unwrap();
        let path = dir.join("argon.state");
        StateFile::write_to_path(&sim_box.snapshot(step), &path).unwrap();
        path
    }

    fn args(dir: &TempDir, steps: u64, state_interval: i64) -> SimulationArgs {
        SimulationArgsBuilder::new()
            .file_path(write_state(dir.path(), 0, 0))
            .file_type(InputFileType::State)
            .simulation_name("argon")
            .step_count(steps)
            .status_interval(0)
            .state_interval(state_interval)
            .output_dir(dir.path().to_path_buf())
            .build()
            .unwrap()
    }

    fn silent() -> ProgressReporter<'static> {
        ProgressReporter::new()
    }

    #[test]
    fn new_reports_missing_input_as_initialization_error() {
        let dir = tempdir().unwrap();
        let args = SimulationArgsBuilder::new()
            .file_path(dir.path().join("missing.state"))
            .build()
            .unwrap();
        assert!(matches!(
            Simulation::new(args),
            Err(EngineError::Initialization(_))
        ));
    }

    #[test]
    fn step_override_replaces_input_step_count() {
        let dir = tempdir().unwrap();
        let simulation = Simulation::new(args(&dir, 250, -1)).unwrap();
        assert_eq!(simulation.step_start(), 0);
        assert_eq!(simulation.sim_steps(), 250);
        assert_eq!(simulation.phase(), Phase::Ready);
    }

    #[test]
    fn run_counts_every_step_once() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 500, -1)).unwrap();
        let report = simulation.run(&silent());

        assert_eq!(report.stats.total(), 500);
        assert_eq!(report.steps, 500);
        assert_eq!(simulation.phase(), Phase::Done);
        assert_eq!(simulation.step_start(), 500);
    }

    #[test]
    fn running_energy_matches_recomputed_energy() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 2000, -1)).unwrap();
        let report = simulation.run(&silent());

        let recomputed = simulation.backend().system_energy(simulation.sim_box());
        let tolerance = 1e-6 * recomputed.abs().max(1.0);
        assert!((report.final_energy - recomputed).abs() <= tolerance);
    }

    #[test]
    fn identical_seeds_give_identical_runs() {
        let first_dir = tempdir().unwrap();
        let second_dir = tempdir().unwrap();
        let mut first = Simulation::new(args(&first_dir, 800, -1)).unwrap();
        let mut second = Simulation::new(args(&second_dir, 800, -1)).unwrap();

        let first_report = first.run(&silent());
        let second_report = second.run(&silent());

        assert_eq!(first_report.stats, second_report.stats);
        assert_eq!(first_report.final_energy, second_report.final_energy);
        assert_eq!(first.sim_box().molecules(), second.sim_box().molecules());
    }

    #[test]
    fn serial_and_parallel_runs_agree() {
        let dir = tempdir().unwrap();
        let mut serial = Simulation::new(args(&dir, 600, -1)).unwrap();
        let mut parallel_args = args(&dir, 600, -1);
        parallel_args.mode = SimulationMode::Parallel;
        let mut parallel = Simulation::new(parallel_args).unwrap();

        let serial_report = serial.run(&silent());
        let parallel_report = parallel.run(&silent());

        assert_eq!(parallel_report.mode, SimulationMode::Parallel);
        assert_eq!(serial_report.stats, parallel_report.stats);
        let tolerance = 1e-3 * serial_report.final_energy.abs().max(1.0);
        assert!(
            (serial_report.final_energy - parallel_report.final_energy).abs() <= tolerance
        );
    }

    #[test]
    fn zero_steps_reports_zero_acceptance() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 0, -1)).unwrap();
        let report = simulation.run(&silent());

        assert_eq!(report.steps, 0);
        assert_eq!(report.stats.total(), 0);
        assert_eq!(report.acceptance_rate(), 0.0);
        assert_eq!(report.final_energy, report.initial_energy);
    }

    #[test]
    fn zero_state_interval_writes_only_final_checkpoint() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 120, 0)).unwrap();
        let report = simulation.run(&silent());

        assert_eq!(report.checkpoints, vec![dir.path().join("argon_120.state")]);
        assert!(dir.path().join("argon_120.state").exists());
        assert!(!report.has_failures());
    }

    #[test]
    fn positive_state_interval_writes_periodic_and_final_checkpoints() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 100, 40)).unwrap();
        let report = simulation.run(&silent());

        let expected: Vec<PathBuf> = [40, 80, 100]
            .iter()
            .map(|step| dir.path().join(format!("argon_{}.state", step)))
            .collect();
        assert_eq!(report.checkpoints, expected);
    }

    #[test]
    fn negative_state_interval_disables_checkpoints() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 50, -1)).unwrap();
        let report = simulation.run(&silent());

        assert!(report.checkpoints.is_empty());
        assert!(!dir.path().join("argon_50.state").exists());
    }

    #[test]
    fn checkpoint_failure_is_recorded_without_aborting() {
        let dir = tempdir().unwrap();
        let mut run_args = args(&dir, 60, 20);
        run_args.output_dir = dir.path().join("does-not-exist");
        let mut simulation = Simulation::new(run_args).unwrap();
        let report = simulation.run(&silent());

        assert_eq!(report.stats.total(), 60);
        assert_eq!(report.failed_checkpoints(), 3);
        assert!(report.checkpoints.is_empty());
        assert!(report.has_failures());
        assert!(report.output_errors.iter().all(|e| e.kind == ArtifactKind::State));
    }

    #[test]
    fn checkpoint_resumes_at_recorded_step() {
        let dir = tempdir().unwrap();
        let mut first = Simulation::new(args(&dir, 70, 0)).unwrap();
        first.run(&silent());

        let resume_args = SimulationArgsBuilder::new()
            .file_path(dir.path().join("argon_70.state"))
            .step_count(30)
            .status_interval(0)
            .state_interval(-1)
            .output_dir(dir.path().to_path_buf())
            .build()
            .unwrap();
        let resumed = Simulation::new(resume_args).unwrap();

        assert_eq!(resumed.step_start(), 70);
        assert_eq!(resumed.sim_steps(), 30);
        assert_eq!(resumed.sim_box().molecules(), first.sim_box().molecules());
    }

    #[test]
    fn state_file_step_count_applies_without_override() {
        let dir = tempdir().unwrap();
        let resume_args = SimulationArgsBuilder::new()
            .file_path(write_state(dir.path(), 40, 90))
            .simulation_name("argon")
            .status_interval(0)
            .output_dir(dir.path().to_path_buf())
            .build()
            .unwrap();
        let mut simulation = Simulation::new(resume_args).unwrap();
        assert_eq!(simulation.sim_steps(), 90);

        let report = simulation.run(&silent());
        assert_eq!(report.step_start, 40);
        assert_eq!(report.stats.total(), 90);
        assert_eq!(report.checkpoints, vec![dir.path().join("argon_130.state")]);
    }

    #[test]
    fn drift_tolerance_scales_with_precision() {
        assert!(drift_tolerance() > 100.0 * Real::EPSILON);
        assert!(drift_tolerance() < 1e-3);
    }

    #[test]
    fn run_announces_its_seed() {
        let dir = tempdir().unwrap();
        let mut simulation = Simulation::new(args(&dir, 10, -1)).unwrap();

        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        simulation.run(&reporter);
        drop(reporter);

        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["Using seed 2024".to_string()]
        );
    }

    #[test]
    fn progress_events_cover_every_step() {
        let dir = tempdir().unwrap();
        let mut run_args = args(&dir, 2500, -1);
        run_args.status_interval = 1000;
        let mut simulation = Simulation::new(run_args).unwrap();

        let increments = Mutex::new(0u64);
        let statuses = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement { amount } => *increments.lock().unwrap() += amount,
            Progress::Status { step, .. } => statuses.lock().unwrap().push(step),
            _ => {}
        }));
        simulation.run(&reporter);
        drop(reporter);

        assert_eq!(increments.into_inner().unwrap(), 2500);
        assert_eq!(statuses.into_inner().unwrap(), vec![0, 1000, 2000]);
    }

    /// A backend that reports a constant energy, so every move is accepted.
    struct FlatBackend;

    impl EnergyBackend for FlatBackend {
        fn mode(&self) -> SimulationMode {
            SimulationMode::Serial
        }

        fn system_energy_terms(&self, _sim_box: &SimBox) -> EnergyTerm {
            EnergyTerm::default()
        }

        fn contribution_terms(&self, _sim_box: &SimBox, _index: usize) -> EnergyTerm {
            EnergyTerm::default()
        }
    }

    #[test]
    fn flat_energy_landscape_accepts_every_move() {
        let dir = tempdir().unwrap();
        let mut simulation =
            Simulation::with_backend(args(&dir, 300, -1), Box::new(FlatBackend)).unwrap();
        let report = simulation.run(&silent());

        assert_eq!(report.stats.accepted, 300);
        assert_eq!(report.acceptance_rate(), 100.0);
    }
}
