use std::path::PathBuf;

/// Values used for options not given on the command line.
pub struct DefaultsConfig {
    pub status_interval: u64,
    pub state_interval: i64,
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            status_interval: 100,
            state_interval: 0,
            output_dir: PathBuf::from("."),
        }
    }
}
