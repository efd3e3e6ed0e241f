use std::io;

use anyhow::Result;
use tracing::info;

use cartogram_cli::pipeline::{PipelineConfig, run_pipeline};
use cartogram_cli::types::RunResult;
use cartogram_join::JoinConfig;
use cartogram_runner::{CartogramCommand, ShellRunner};

use crate::cli::Cli;

/// Resolve the command line into a pipeline configuration.
pub fn pipeline_config(cli: &Cli) -> Result<PipelineConfig> {
    let join = JoinConfig::new(cli.name_field.clone(), cli.value.clone()).with_scaling(cli.scaling);
    let config = PipelineConfig::new(cli.dataset.clone(), join)?
        .with_command(CartogramCommand::new(cli.binary.clone()))
        .with_failure_policy(cli.on_failure.into())
        .with_cleanup(!cli.skip_cleanup);
    Ok(config)
}

pub fn run_cartogram(cli: &Cli) -> Result<RunResult> {
    let config = pipeline_config(cli)?;
    info!(
        dataset = %config.dataset.display(),
        binary = %config.command.binary().display(),
        policy = %config.failure_policy,
        "starting cartogram pipeline"
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_pipeline(&config, &ShellRunner::new(), &mut out)
}
