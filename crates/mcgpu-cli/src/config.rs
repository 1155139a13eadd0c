pub mod defaults;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use self::defaults::DefaultsConfig;
use mcgpu::engine::config::{SimulationArgs, SimulationArgsBuilder};
use tracing::debug;

/// Merges command-line options over the defaults into the engine's run arguments.
pub fn resolve_args(cli: &Cli, defaults: &DefaultsConfig) -> Result<SimulationArgs> {
    let mut builder = SimulationArgsBuilder::new()
        .mode(cli.mode.selected())
        .file_path(cli.input.clone())
        .status_interval(cli.status_interval.unwrap_or(defaults.status_interval))
        .state_interval(cli.state_interval.unwrap_or(defaults.state_interval))
        .output_dir(
            cli.output_dir
                .clone()
                .unwrap_or_else(|| defaults.output_dir.clone()),
        );

    if let Some(file_type) = cli.file_type {
        builder = builder.file_type(file_type.into());
    }
    if let Some(name) = &cli.name {
        builder = builder.simulation_name(name.clone());
    }
    if let Some(steps) = cli.steps {
        builder = builder.step_count(steps);
    }

    let args = builder.build().map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved simulation arguments: {:?}", args);
    Ok(args)
}
