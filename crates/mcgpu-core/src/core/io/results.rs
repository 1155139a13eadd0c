use crate::core::models::Real;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Summary of a finished run, persisted as an INI-like text file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub timestamp: DateTime<Local>,
    pub simulation_name: Option<String>,
    /// Label of the backend that evaluated energies (`CPU` or `GPU`).
    pub mode_label: &'static str,
    pub starting_step: u64,
    pub steps: u64,
    pub molecule_count: usize,
    pub final_energy: Real,
    pub run_time: Duration,
    pub accepted_moves: u64,
    pub rejected_moves: u64,
    /// Accepted moves as a percentage of all proposed moves.
    pub acceptance_rate: Real,
}

pub struct ResultsFile;

impl ResultsFile {
    pub fn write_to(record: &RunRecord, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "######### MCGPU Results File #############")?;
        writeln!(writer, "[Information]")?;
        writeln!(
            writer,
            "Timestamp = {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S")
        )?;
        if let Some(name) = &record.simulation_name {
            writeln!(writer, "Simulation-Name = {}", name)?;
        }
        writeln!(writer, "Simulation-Mode = {}", record.mode_label)?;
        writeln!(writer, "Starting-Step = {}", record.starting_step)?;
        writeln!(writer, "Steps = {}", record.steps)?;
        writeln!(writer, "Molecule-Count = {}", record.molecule_count)?;
        writeln!(writer)?;
        writeln!(writer, "[Results]")?;
        writeln!(writer, "Final-Energy = {}", record.final_energy)?;
        writeln!(
            writer,
            "Run-Time = {:.3} seconds",
            record.run_time.as_secs_f64()
        )?;
        writeln!(writer, "Accepted-Moves = {}", record.accepted_moves)?;
        writeln!(writer, "Rejected-Moves = {}", record.rejected_moves)?;
        writeln!(writer, "Acceptance-Rate = {:.2}%", record.acceptance_rate)?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(record: &RunRecord, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(record, &mut writer)?;
        writer.flush()
    }
}
