use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Cannot infer the input file type of '{0}'; specify it explicitly")]
    UnknownFileType(String),
}

/// Which energy backend evaluates the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    #[default]
    Serial,
    Parallel,
}

impl SimulationMode {
    /// Label written to results files: `CPU` for serial runs, `GPU` for the
    /// data-parallel backend.
    pub fn label(&self) -> &'static str {
        match self {
            SimulationMode::Serial => "CPU",
            SimulationMode::Parallel => "GPU",
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::Serial => f.write_str("serial"),
            SimulationMode::Parallel => f.write_str("parallel"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFileType {
    /// A TOML configuration describing a fresh system.
    Config,
    /// A checkpoint written by an earlier run.
    State,
}

impl InputFileType {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "state" => Some(InputFileType::State),
            "toml" | "config" => Some(InputFileType::Config),
            _ => None,
        }
    }
}

/// Fully resolved arguments of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationArgs {
    pub mode: SimulationMode,
    pub file_path: PathBuf,
    pub file_type: InputFileType,
    pub simulation_name: Option<String>,
    /// Replaces the step count from the input when positive.
    pub step_count: Option<u64>,
    /// Steps between status reports; 0 disables them.
    pub status_interval: u64,
    /// Steps between checkpoints. 0 writes only the final checkpoint, a negative value
    /// disables checkpoints entirely.
    pub state_interval: i64,
    pub output_dir: PathBuf,
}

impl SimulationArgs {
    /// Base name of state files.
    pub fn state_base_name(&self) -> &str {
        self.simulation_name.as_deref().unwrap_or("untitled")
    }

    /// Base name of the results and coordinate files.
    pub fn artifact_name(&self) -> &str {
        self.simulation_name.as_deref().unwrap_or("run")
    }

    pub fn state_path(&self, step: u64) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.state", self.state_base_name(), step))
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.results", self.artifact_name()))
    }

    pub fn pdb_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pdb", self.artifact_name()))
    }
}

#[derive(Default)]
pub struct SimulationArgsBuilder {
    mode: Option<SimulationMode>,
    file_path: Option<PathBuf>,
    file_type: Option<InputFileType>,
    simulation_name: Option<String>,
    step_count: Option<u64>,
    status_interval: Option<u64>,
    state_interval: Option<i64>,
    output_dir: Option<PathBuf>,
}

impl SimulationArgsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: SimulationMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn file_path(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }
    pub fn file_type(mut self, file_type: InputFileType) -> Self {
        self.file_type = Some(file_type);
        self
    }
    pub fn simulation_name(mut self, name: impl Into<String>) -> Self {
        self.simulation_name = Some(name.into());
        self
    }
    pub fn step_count(mut self, steps: u64) -> Self {
        self.step_count = Some(steps);
        self
    }
    pub fn status_interval(mut self, interval: u64) -> Self {
        self.status_interval = Some(interval);
        self
    }
    pub fn state_interval(mut self, interval: i64) -> Self {
        self.state_interval = Some(interval);
        self
    }
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn build(self) -> Result<SimulationArgs, ConfigError> {
        let file_path = self
            .file_path
            .ok_or(ConfigError::MissingParameter("file_path"))?;
        let file_type = match self.file_type {
            Some(file_type) => file_type,
            None => InputFileType::from_path(&file_path)
                .ok_or_else(|| ConfigError::UnknownFileType(file_path.display().to_string()))?,
        };

        Ok(SimulationArgs {
            mode: self.mode.unwrap_or_default(),
            file_path,
            file_type,
            simulation_name: self.simulation_name.filter(|name| !name.is_empty()),
            step_count: self.step_count.filter(|&steps| steps > 0),
            status_interval: self.status_interval.unwrap_or(100),
            state_interval: self.state_interval.unwrap_or(0),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_is_inferred_from_extension() {
        assert_eq!(
            InputFileType::from_path(Path::new("water_500.state")),
            Some(InputFileType::State)
        );
        assert_eq!(
            InputFileType::from_path(Path::new("inputs/water.TOML")),
            Some(InputFileType::Config)
        );
        assert_eq!(
            InputFileType::from_path(Path::new("water.config")),
            Some(InputFileType::Config)
        );
        assert_eq!(InputFileType::from_path(Path::new("water.xyz")), None);
        assert_eq!(InputFileType::from_path(Path::new("water")), None);
    }

    #[test]
    fn builder_applies_defaults() {
        let args = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.toml"))
            .build()
            .unwrap();

        assert_eq!(args.mode, SimulationMode::Serial);
        assert_eq!(args.file_type, InputFileType::Config);
        assert_eq!(args.simulation_name, None);
        assert_eq!(args.step_count, None);
        assert_eq!(args.status_interval, 100);
        assert_eq!(args.state_interval, 0);
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn builder_requires_file_path() {
        let result = SimulationArgsBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("file_path")));
    }

    #[test]
    fn builder_rejects_unknown_extension_without_explicit_type() {
        let result = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.dat"))
            .build();
        assert!(matches!(result, Err(ConfigError::UnknownFileType(_))));

        let args = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.dat"))
            .file_type(InputFileType::State)
            .build()
            .unwrap();
        assert_eq!(args.file_type, InputFileType::State);
    }

    #[test]
    fn zero_step_override_keeps_input_step_count() {
        let args = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.toml"))
            .step_count(0)
            .build()
            .unwrap();
        assert_eq!(args.step_count, None);
    }

    #[test]
    fn artifact_paths_use_name_or_defaults() {
        let unnamed = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.toml"))
            .output_dir(PathBuf::from("out"))
            .build()
            .unwrap();
        assert_eq!(unnamed.state_path(40), PathBuf::from("out/untitled_40.state"));
        assert_eq!(unnamed.results_path(), PathBuf::from("out/run.results"));
        assert_eq!(unnamed.pdb_path(), PathBuf::from("out/run.pdb"));

        let named = SimulationArgsBuilder::new()
            .file_path(PathBuf::from("water.toml"))
            .simulation_name("waterCPU")
            .build()
            .unwrap();
        assert_eq!(named.state_path(7), PathBuf::from("./waterCPU_7.state"));
        assert_eq!(named.results_path(), PathBuf::from("./waterCPU.results"));
    }

    #[test]
    fn mode_labels_match_results_convention() {
        assert_eq!(SimulationMode::Serial.label(), "CPU");
        assert_eq!(SimulationMode::Parallel.label(), "GPU");
    }
}
