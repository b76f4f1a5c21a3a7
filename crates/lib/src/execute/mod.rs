//! Schedule execution.
//!
//! Runs a resolved [`ExecutionSchedule`] wave by wave. Actions within a wave
//! run concurrently, bounded by [`ExecuteConfig::parallelism`]. After the
//! first failure no further waves are started; the remaining actions are
//! recorded as skipped, with dependents of the failed action named as such.

pub mod actions;
pub mod types;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::action::{ActionName, ActionRegistry};
use crate::graph::{ExecutionOrderGraph, ExecutionSchedule};
use crate::orchestrator::FinalizedModule;

use actions::EnvResolver;

pub use actions::execute_action;
pub use types::{ActionOutcome, ExecuteConfig, ExecuteError, ScheduleResult, SkipCause};

/// Resolve `requested` against a finalized module and execute the schedule.
pub async fn run(
  module: &FinalizedModule,
  requested: &[String],
  config: &ExecuteConfig,
) -> Result<ScheduleResult, ExecuteError> {
  let schedule = module.graph.resolve(requested)?;
  execute_schedule(&schedule, &module.model.actions, &module.graph, config).await
}

/// Execute every action in `schedule`.
///
/// Environment variables are snapshotted once, when the run starts.
pub async fn execute_schedule(
  schedule: &ExecutionSchedule,
  registry: &ActionRegistry,
  graph: &ExecutionOrderGraph,
  config: &ExecuteConfig,
) -> Result<ScheduleResult, ExecuteError> {
  info!(
    actions = schedule.len(),
    waves = schedule.waves.len(),
    dry_run = config.dry_run,
    "starting execution"
  );

  let mut result = ScheduleResult::default();
  for skipped in &schedule.skipped {
    debug!(action = %skipped.name, reason = %skipped.reason, "action not scheduled");
    result
      .skipped
      .insert(skipped.name.clone(), SkipCause::Condition(skipped.reason));
  }

  let resolver = Arc::new(EnvResolver::from_process(config));
  let semaphore = Arc::new(Semaphore::new(config.parallelism.max(1)));
  let mut failed: HashSet<ActionName> = HashSet::new();
  let mut aborted = false;

  for (wave_idx, wave) in schedule.waves.iter().enumerate() {
    let mut ready = Vec::new();

    for name in wave {
      let failed_dep = graph.predecessors(name).into_iter().find(|dep| failed.contains(dep));

      if let Some(dep) = failed_dep {
        warn!(action = %name, failed_dep = %dep, "skipping action due to failed dependency");
        failed.insert(name.clone());
        result.skipped.insert(name.clone(), SkipCause::DependencyFailed(dep));
      } else if aborted {
        result.skipped.insert(name.clone(), SkipCause::RunAborted);
      } else {
        let def = registry
          .get(name.as_str())
          .ok_or_else(|| ExecuteError::ActionNotFound(name.clone()))?;
        ready.push(def.clone());
      }
    }

    if ready.is_empty() {
      continue;
    }

    debug!(wave = wave_idx, actions = ready.len(), "executing wave");

    let mut join_set = JoinSet::new();
    for def in ready {
      let resolver = resolver.clone();
      let config = config.clone();
      let semaphore = semaphore.clone();

      join_set.spawn(async move {
        let outcome = match semaphore.acquire().await {
          Ok(_permit) => execute_action(&def, &resolver, &config).await,
          Err(_) => Err(ExecuteError::Cancelled),
        };
        (def.name, outcome)
      });
    }

    while let Some(joined) = join_set.join_next().await {
      match joined {
        Ok((name, Ok(outcome))) => {
          info!(action = %name, "action succeeded");
          result.completed.push(outcome);
        }
        Ok((name, Err(e))) => {
          error!(action = %name, error = %e, "action failed");
          failed.insert(name.clone());
          result.failed.push((name, e));
          aborted = true;
        }
        Err(e) => {
          error!(error = %e, "action task panicked");
          aborted = true;
        }
      }
    }
  }

  info!(
    completed = result.completed.len(),
    failed = result.failed.len(),
    skipped = result.skipped.len(),
    "execution complete"
  );

  Ok(result)
}
