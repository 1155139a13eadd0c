use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mcgpu::engine::config::SimulationArgs;
use mcgpu::engine::driver::SimulationReport;
use mcgpu::engine::progress::ProgressReporter;
use mcgpu::workflows;
use std::fs;
use tracing::{error, info};

pub fn run(args: SimulationArgs) -> Result<()> {
    if !args.output_dir.exists() {
        info!("Creating output directory {:?}", &args.output_dir);
        fs::create_dir_all(&args.output_dir)?;
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting {} simulation of '{}'...",
        args.mode,
        args.file_path.display()
    );
    info!("Invoking the core simulation workflow...");

    let outcome = workflows::simulate::run(args, &reporter)?;

    println!("{}", summary(&outcome.report));
    if outcome.output_errors.is_empty() {
        println!("Results written to: {}", outcome.results_path.display());
        println!("Coordinates written to: {}", outcome.pdb_path.display());
        return Ok(());
    }

    for failure in &outcome.output_errors {
        error!("{}", failure);
        eprintln!("  ✗ {}", failure);
    }
    Err(CliError::Output(outcome.output_errors.len()))
}

fn summary(report: &SimulationReport) -> String {
    format!(
        "Final Energy: {:.6} kcal/mol\n\
         Run Time: {:.3} seconds\n\
         Accepted Moves: {}\n\
         Rejected Moves: {}\n\
         Acceptance Ratio: {:.2}%",
        report.final_energy,
        report.run_time.as_secs_f64(),
        report.stats.accepted,
        report.stats.rejected,
        report.acceptance_rate()
    )
}
