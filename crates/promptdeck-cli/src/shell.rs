//! Shell execution for custom commands.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Run a shell command line with `sh -c`, streaming its output to the
/// terminal.
///
/// A spawn failure is an error and ends the prompt loop. A non-zero exit is
/// the command's own business: it is logged and the loop carries on.
pub fn run_line(line: &str, cwd: Option<&Path>) -> Result<()> {
    tracing::debug!(command = line, cwd = ?cwd, "exec");
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(line);
    if let Some(dir) = cwd {
        shell.current_dir(dir);
    }
    let status = shell
        .status()
        .with_context(|| format!("failed to run: {line}"))?;
    if !status.success() {
        tracing::warn!(command = line, %status, "command failed");
    }
    Ok(())
}
