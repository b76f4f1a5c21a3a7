//! External tool invocation.

use std::collections::BTreeMap;
use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::execute::types::ExecuteError;

/// Spawn `bin` with `args` and wait for it.
///
/// The child runs in `module_dir` and inherits the process environment with
/// `env` layered on top, so the toolchain finds its own installation.
///
/// Returns the trimmed stdout on success.
pub async fn execute_cmd(
  bin: &str,
  args: &[String],
  env: Option<&BTreeMap<String, String>>,
  module_dir: &Path,
) -> Result<String, ExecuteError> {
  let shown = command_line(bin, args);
  info!(cmd = %shown, "executing command");

  let mut command = Command::new(bin);
  command.args(args).current_dir(module_dir);
  if let Some(env) = env {
    command.envs(env);
  }

  debug!(working_dir = ?module_dir, "spawning process");

  let output = command.output().await?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }

    return Err(ExecuteError::CmdFailed {
      cmd: shown,
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command output");
  }

  Ok(stdout)
}

pub(crate) fn command_line(bin: &str, args: &[String]) -> String {
  std::iter::once(bin)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}
