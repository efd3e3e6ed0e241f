//! Invocation of the external cartogram binary.
//!
//! The binary is opaque: it is handed a command line and optional stdin
//! bytes, and yields stdout, stderr and an exit code. [`CommandRunner`] is
//! the seam; [`ShellRunner`] runs through the platform shell.

pub mod command;
pub mod error;
pub mod invocation;
pub mod output;
pub mod runner;

pub use command::{CartogramCommand, DEFAULT_BINARY, shell_quote};
pub use error::{Result, RunnerError};
pub use invocation::Invocation;
pub use output::CommandOutput;
pub use runner::{CommandRunner, ShellRunner};
