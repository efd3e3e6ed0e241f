use std::fmt;

/// What to do when an external invocation exits unsuccessfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure and run the next stage anyway.
    #[default]
    Continue,
    /// Report the failure and stop the run.
    Halt,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Continue => "continue",
            FailurePolicy::Halt => "halt",
        }
    }

    pub fn halts(&self) -> bool {
        matches!(self, FailurePolicy::Halt)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
