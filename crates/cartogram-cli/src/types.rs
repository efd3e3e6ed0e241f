use std::fmt;
use std::path::PathBuf;

use cartogram_join::JoinSummary;
use cartogram_model::{DerivedPaths, FailurePolicy};
use cartogram_runner::CommandOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRecord {
    pub path: PathBuf,
    pub outcome: CleanupOutcome,
}

impl CleanupRecord {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// The line printed for each derived file at startup.
impl fmt::Display for CleanupRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            CleanupOutcome::Removed => write!(f, "Removed existing {}", self.file_name()),
            CleanupOutcome::Absent => {
                write!(f, "{} not existing. Skipping removal.", self.file_name())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Cleanup,
    Normalize,
    Join,
    Apply,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Cleanup => "cleanup",
            Stage::Normalize => "normalize",
            Stage::Join => "join",
            Stage::Apply => "apply",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Failed,
    Skipped,
    NotRun,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Done => "done",
            StageStatus::Failed => "failed",
            StageStatus::Skipped => "skipped",
            StageStatus::NotRun => "not run",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: Stage,
    pub status: StageStatus,
    pub detail: String,
    pub duration_ms: u128,
}

#[derive(Debug)]
pub struct RunResult {
    pub dataset: PathBuf,
    pub paths: DerivedPaths,
    pub policy: FailurePolicy,
    pub cleanup: Vec<CleanupRecord>,
    pub stages: Vec<StageSummary>,
    pub commands: Vec<CommandOutput>,
    pub join: Option<JoinSummary>,
    pub warnings: Vec<String>,
    /// Set when the halt policy stopped the run after a failed invocation.
    pub halted: bool,
}

impl RunResult {
    pub fn stage(&self, stage: Stage) -> Option<&StageSummary> {
        self.stages.iter().find(|summary| summary.stage == stage)
    }

    pub fn has_errors(&self) -> bool {
        self.halted
    }
}
