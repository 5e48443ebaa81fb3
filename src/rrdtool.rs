//! Thin wrapper around the `rrdtool` executable.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::trace;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_RRDTOOL: &str = "rrdtool";

/// Location of the `rrdtool` binary shared by the reader and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrdtoolCommand {
    binary: PathBuf,
}

impl RrdtoolCommand {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Runs `rrdtool <subcommand> <args...>` and returns its stdout.
    ///
    /// A spawn failure or non-zero exit is reported as a message including
    /// rrdtool's stderr.
    pub(crate) fn run<I, S>(&self, subcommand: &str, args: I) -> Result<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.binary);
        command.arg(subcommand).args(args);
        trace!(binary = %self.binary.display(), subcommand, "spawning rrdtool");

        let output = command
            .output()
            .map_err(|e| format!("failed to run {}: {e}", self.binary.display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "rrdtool {subcommand} exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for RrdtoolCommand {
    fn default() -> Self {
        Self::new(DEFAULT_RRDTOOL)
    }
}
