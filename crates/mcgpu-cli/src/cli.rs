use clap::{Args, Parser, ValueEnum};
use mcgpu::engine::config::{InputFileType, SimulationMode};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Nathan Coleman, Albert Wallace, Joshua Mosby",
    version,
    about = "metrosim - Metropolis Monte Carlo simulation of rigid molecules in a periodic box.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Input file: a TOML system configuration or a `.state` checkpoint to resume from.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub mode: ModeFlags,

    /// Type of the input file. Inferred from the extension when omitted.
    #[arg(long, value_enum, value_name = "TYPE")]
    pub file_type: Option<FileTypeArg>,

    /// Simulation name, used to name the results, coordinate and state files.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Override the number of steps to simulate.
    #[arg(long, value_name = "INT")]
    pub steps: Option<u64>,

    /// Steps between status updates (0 disables them).
    #[arg(short = 'i', long, value_name = "INT")]
    pub status_interval: Option<u64>,

    /// Steps between state checkpoints. 0 saves only the final state; a negative value
    /// disables state files.
    #[arg(short = 'I', long, value_name = "INT", allow_negative_numbers = true)]
    pub state_interval: Option<i64>,

    /// Directory receiving every output file.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by the parallel backend.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub threads: Option<usize>,
}

/// Mutually exclusive backend selection flags.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct ModeFlags {
    /// Evaluate energies serially on one thread (default).
    #[arg(short, long)]
    pub serial: bool,
    /// Evaluate energies with the data-parallel backend.
    #[arg(short, long)]
    pub parallel: bool,
}

impl ModeFlags {
    pub fn selected(&self) -> SimulationMode {
        if self.parallel {
            SimulationMode::Parallel
        } else {
            SimulationMode::Serial
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileTypeArg {
    Config,
    State,
}

impl From<FileTypeArg> for InputFileType {
    fn from(arg: FileTypeArg) -> Self {
        match arg {
            FileTypeArg::Config => InputFileType::Config,
            FileTypeArg::State => InputFileType::State,
        }
    }
}
