//! Types for schedule execution.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::action::ActionName;
use crate::graph::{GraphError, SkipReason};
use crate::placeholder::PlaceholderError;

/// Why a scheduled action did not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cause", content = "detail", rename_all = "snake_case")]
pub enum SkipCause {
  /// A predecessor failed or was itself skipped for that reason.
  DependencyFailed(ActionName),
  /// Another action failed earlier and no further waves were started.
  RunAborted,
  /// The action's run condition did not hold.
  Condition(SkipReason),
}

impl std::fmt::Display for SkipCause {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SkipCause::DependencyFailed(name) => write!(f, "dependency failed: {}", name),
      SkipCause::RunAborted => write!(f, "run aborted"),
      SkipCause::Condition(reason) => write!(f, "{}", reason),
    }
  }
}

#[derive(Debug, Error)]
pub enum ExecuteError {
  #[error("placeholder error: {0}")]
  Placeholder(#[from] PlaceholderError),

  #[error(transparent)]
  Graph(#[from] GraphError),

  /// A credential or other required variable is not set.
  #[error("action '{action}' requires environment variable {var}, which is not set")]
  MissingEnv { action: ActionName, var: String },

  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("action not found: {0}")]
  ActionNotFound(ActionName),

  #[error("execution was cancelled")]
  Cancelled,
}

/// Result of running a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
  pub name: ActionName,
  /// Resolved command line. `None` for actions with no work of their own.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub command: Option<String>,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub stdout: String,
  pub dry_run: bool,
}

/// Result of executing a whole schedule.
#[derive(Debug, Default)]
pub struct ScheduleResult {
  /// Actions that completed, in completion order.
  pub completed: Vec<ActionOutcome>,

  /// Actions that failed. Only the wave that saw the first failure can add more than one.
  pub failed: Vec<(ActionName, ExecuteError)>,

  pub skipped: BTreeMap<ActionName, SkipCause>,
}

impl ScheduleResult {
  /// True if nothing failed. Condition skips do not count as failures.
  pub fn is_success(&self) -> bool {
    self.failed.is_empty() && self.skipped.values().all(|cause| matches!(cause, SkipCause::Condition(_)))
  }

  pub fn total(&self) -> usize {
    self.completed.len() + self.failed.len() + self.skipped.len()
  }

  pub fn is_completed(&self, name: &str) -> bool {
    self.completed.iter().any(|o| o.name.as_str() == name)
  }
}

/// Configuration for schedule execution.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
  /// Maximum number of actions to run in parallel.
  pub parallelism: usize,

  /// Resolve and log every command without spawning it.
  pub dry_run: bool,

  /// Working directory for actions that do not set one.
  pub module_dir: PathBuf,

  /// Value of `$${out}`.
  pub out_dir: PathBuf,

  /// Variables layered over the process environment when resolving placeholders.
  pub env_overrides: BTreeMap<String, String>,
}

impl Default for ExecuteConfig {
  fn default() -> Self {
    Self {
      parallelism: num_cpus(),
      dry_run: false,
      module_dir: PathBuf::from("."),
      out_dir: PathBuf::from(crate::consts::project::BUILD_DIR),
      env_overrides: BTreeMap::new(),
    }
  }
}

fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}
