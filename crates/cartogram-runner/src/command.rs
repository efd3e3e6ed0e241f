//! Command lines for the two passes of the external cartogram binary.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::invocation::Invocation;

/// Conventional location of the external binary.
pub const DEFAULT_BINARY: &str = "./cartogram";

/// Builds invocations of the external cartogram binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartogramCommand {
    binary: PathBuf,
}

impl Default for CartogramCommand {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl CartogramCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Normalization pass: `<binary> -p <dataset>`, with the region name
    /// attribute piped to stdin.
    pub fn normalize(&self, dataset: &Path, name_field: &str) -> Invocation {
        let command = format!(
            "{} -p {}",
            quote_path(&self.binary),
            quote_path(dataset)
        );
        Invocation::new(command).with_stdin(name_field.as_bytes())
    }

    /// Apply pass: `<binary> -g <processed-map> -a <processed-csv>`, no stdin.
    pub fn apply(&self, processed_map: &Path, processed_csv: &Path) -> Invocation {
        let command = format!(
            "{} -g {} -a {}",
            quote_path(&self.binary),
            quote_path(processed_map),
            quote_path(processed_csv)
        );
        Invocation::new(command)
    }
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy()).into_owned()
}

fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | '=' | ':' | ',' | '+' | '@' | '%')
}

/// Quote an argument for the platform shell. Plain arguments are returned
/// unchanged.
#[cfg(not(windows))]
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && arg.chars().all(is_shell_safe) {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
}

/// Quote an argument for the platform shell. Plain arguments are returned
/// unchanged.
#[cfg(windows)]
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && arg.chars().all(|ch| is_shell_safe(ch) || ch == '\\') {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("\"{}\"", arg.replace('"', "\"\"")))
}
