//! Cartogram pipeline with explicit stages.
//!
//! The pipeline runs these stages in order:
//! 1. **Cleanup**: remove derived files left over from a previous run
//! 2. **Normalize**: `<binary> -p <dataset>` with the name attribute on stdin
//! 3. **Join**: rewrite the region table with scaled attribute values
//! 4. **Apply**: `<binary> -g <processed-map> -a <processed-csv>`
//!
//! Cleanup outcomes and the labeled output of every external invocation are
//! written to the report stream. A failed external invocation is reported
//! and, under the default policy, the next stage runs anyway. Errors of the
//! join stage are fatal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cartogram_ingest::GeoJsonSource;
use cartogram_join::{JoinConfig, JoinSummary, join_region_csv};
use cartogram_model::{DerivedPaths, FailurePolicy};
use cartogram_runner::{CartogramCommand, CommandOutput, CommandRunner, Invocation};

use crate::types::{
    CleanupOutcome, CleanupRecord, RunResult, Stage, StageStatus, StageSummary,
};

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset: PathBuf,
    pub paths: DerivedPaths,
    pub join: JoinConfig,
    pub command: CartogramCommand,
    pub failure_policy: FailurePolicy,
    pub cleanup: bool,
}

impl PipelineConfig {
    /// Validate the join configuration and derive the intermediate paths.
    /// Nothing on disk is touched.
    pub fn new(dataset: impl Into<PathBuf>, join: JoinConfig) -> Result<Self> {
        join.validate()?;
        let dataset = dataset.into();
        let paths = DerivedPaths::from_dataset(&dataset)?;
        Ok(Self {
            dataset,
            paths,
            join,
            command: CartogramCommand::default(),
            failure_policy: FailurePolicy::default(),
            cleanup: true,
        })
    }

    #[must_use]
    pub fn with_command(mut self, command: CartogramCommand) -> Self {
        self.command = command;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_cleanup(mut self, enable: bool) -> Self {
        self.cleanup = enable;
        self
    }
}

// ============================================================================
// Stage 1: Cleanup
// ============================================================================

/// Remove every derived file. Files that do not exist are skipped.
pub fn cleanup(paths: &DerivedPaths) -> Result<Vec<CleanupRecord>> {
    let mut records = Vec::with_capacity(3);
    for path in paths.all() {
        let record = CleanupRecord {
            path: path.to_path_buf(),
            outcome: remove_stale(path)?,
        };
        info!(file = %record.file_name(), outcome = ?record.outcome, "{record}");
        records.push(record);
    }
    Ok(records)
}

fn remove_stale(path: &Path) -> Result<CleanupOutcome> {
    match fs::remove_file(path) {
        Ok(()) => Ok(CleanupOutcome::Removed),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(CleanupOutcome::Absent),
        Err(error) => Err(error).with_context(|| format!("remove {}", path.display())),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Stage 2 and 4: External invocations
// ============================================================================

/// Run one invocation, print its labeled report to `out` and log a warning
/// when it failed.
pub fn run_external<R, W>(runner: &R, invocation: &Invocation, out: &mut W) -> Result<CommandOutput>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let output = runner
        .run(invocation)
        .with_context(|| format!("run `{invocation}`"))?;
    out.write_all(output.render_report().as_bytes())
        .and_then(|()| out.flush())
        .context("write command report")?;
    if let Some(line) = output.failure_line() {
        warn!(command = %output.command, exit_code = ?output.exit_code, "{line}");
    }
    Ok(output)
}

// ============================================================================
// Stage 3: Join
// ============================================================================

/// Join the region table written by the normalization pass against the
/// normalized map.
pub fn join(config: &PipelineConfig) -> Result<JoinSummary> {
    let paths = &config.paths;
    let source = GeoJsonSource::open(&paths.processed_map)
        .with_context(|| format!("load {}", paths.processed_map.display()))?;
    let summary = join_region_csv(
        &source,
        &paths.data_csv,
        &paths.processed_csv,
        &config.join,
    )
    .with_context(|| format!("join {}", paths.data_csv.display()))?;
    Ok(summary)
}

// ============================================================================
// Driver
// ============================================================================

/// Run all stages in order, printing command reports to `out`.
pub fn run_pipeline<R, W>(config: &PipelineConfig, runner: &R, out: &mut W) -> Result<RunResult>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let run_span = info_span!("run", dataset = %config.dataset.display());
    let _run_guard = run_span.enter();
    let mut result = RunResult {
        dataset: config.dataset.clone(),
        paths: config.paths.clone(),
        policy: config.failure_policy,
        cleanup: Vec::new(),
        stages: Vec::new(),
        commands: Vec::new(),
        join: None,
        warnings: Vec::new(),
        halted: false,
    };

    // Stage 1: Cleanup
    if config.cleanup {
        let start = Instant::now();
        let records = info_span!("cleanup").in_scope(|| cleanup(&config.paths))?;
        for record in &records {
            writeln!(out, "{record}").context("write cleanup report")?;
        }
        let removed = records
            .iter()
            .filter(|record| record.outcome == CleanupOutcome::Removed)
            .count();
        result.stages.push(StageSummary {
            stage: Stage::Cleanup,
            status: StageStatus::Done,
            detail: format!("removed {removed} of {} derived files", records.len()),
            duration_ms: start.elapsed().as_millis(),
        });
        result.cleanup = records;
    } else {
        result.stages.push(not_executed(
            Stage::Cleanup,
            StageStatus::Skipped,
            "--skip-cleanup",
        ));
    }

    // Stage 2: Normalize
    let normalize = config
        .command
        .normalize(&config.dataset, &config.join.name_field);
    if !external_stage(Stage::Normalize, &normalize, config, runner, out, &mut result)? {
        result
            .stages
            .push(not_executed(Stage::Join, StageStatus::NotRun, "halted"));
        result
            .stages
            .push(not_executed(Stage::Apply, StageStatus::NotRun, "halted"));
        return Ok(result);
    }

    // Stage 3: Join
    let start = Instant::now();
    let summary = info_span!("join").in_scope(|| join(config))?;
    if !summary.unused_regions.is_empty() {
        let message = format!(
            "{} mapped region(s) not referenced by {}: {}",
            summary.unused_regions.len(),
            config.paths.data_csv.display(),
            summary.unused_regions.join(", ")
        );
        warn!(unused_count = summary.unused_regions.len(), "{message}");
        result.warnings.push(message);
    }
    result.stages.push(StageSummary {
        stage: Stage::Join,
        status: StageStatus::Done,
        detail: format!(
            "{} rows written to {}",
            summary.rows,
            display_name(&config.paths.processed_csv)
        ),
        duration_ms: start.elapsed().as_millis(),
    });
    result.join = Some(summary);

    // Stage 4: Apply
    let apply = config
        .command
        .apply(&config.paths.processed_map, &config.paths.processed_csv);
    external_stage(Stage::Apply, &apply, config, runner, out, &mut result)?;

    info!(
        halted = result.halted,
        warning_count = result.warnings.len(),
        "pipeline finished"
    );
    Ok(result)
}

/// Run an external stage and record it. Returns `false` when the failure
/// policy says to stop.
fn external_stage<R, W>(
    stage: Stage,
    invocation: &Invocation,
    config: &PipelineConfig,
    runner: &R,
    out: &mut W,
    result: &mut RunResult,
) -> Result<bool>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let start = Instant::now();
    let output = info_span!("external", stage = %stage)
        .in_scope(|| run_external(runner, invocation, out))?;
    let duration_ms = start.elapsed().as_millis();
    let mut proceed = true;
    let summary = match output.failure_line() {
        None => StageSummary {
            stage,
            status: StageStatus::Done,
            detail: invocation.command.clone(),
            duration_ms,
        },
        Some(line) => {
            result.warnings.push(line.clone());
            if config.failure_policy.halts() {
                warn!(stage = %stage, "halting after failed invocation");
                result.halted = true;
                proceed = false;
            }
            StageSummary {
                stage,
                status: StageStatus::Failed,
                detail: line,
                duration_ms,
            }
        }
    };
    result.stages.push(summary);
    result.commands.push(output);
    Ok(proceed)
}

fn not_executed(stage: Stage, status: StageStatus, reason: &str) -> StageSummary {
    StageSummary {
        stage,
        status,
        detail: reason.to_string(),
        duration_ms: 0,
    }
}
