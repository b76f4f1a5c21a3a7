//! Implementation of the `forge run` command.
//!
//! Finalizes the module, resolves the requested actions and executes the
//! schedule. Credentials are read from the environment when the actions that
//! need them run.

use std::time::Instant;

use anyhow::{Context, Result, bail};

use modforge_lib::execute::{ExecuteConfig, ScheduleResult, run};

use crate::ModuleArgs;
use crate::output::{
  OutputFormat, format_duration, print_error, print_item, print_json, print_stat, print_success, print_warning,
  symbols,
};

pub fn cmd_run(
  args: &ModuleArgs,
  actions: &[String],
  dry_run: bool,
  jobs: Option<usize>,
  format: OutputFormat,
) -> Result<()> {
  let module = args.finalize()?;

  let module_dir = args.module_dir();
  let mut config = ExecuteConfig {
    dry_run,
    out_dir: module_dir.join(modforge_lib::consts::project::BUILD_DIR),
    module_dir,
    ..Default::default()
  };
  if let Some(jobs) = jobs {
    config.parallelism = jobs;
  }

  let started = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt
    .block_on(run(&module, actions, &config))
    .context("Failed to run actions")?;
  let elapsed = started.elapsed();

  if format.is_json() {
    print_json(&result_json(&result, dry_run))?;
  } else {
    print_result(&result, dry_run, &format_duration(elapsed));
  }

  if !result.is_success() {
    bail!("{} action(s) failed", result.failed.len().max(1));
  }
  Ok(())
}

fn result_json(result: &ScheduleResult, dry_run: bool) -> serde_json::Value {
  let failed: Vec<_> = result
    .failed
    .iter()
    .map(|(name, err)| serde_json::json!({ "name": name, "error": err.to_string() }))
    .collect();
  serde_json::json!({
    "dry_run": dry_run,
    "success": result.is_success(),
    "completed": result.completed,
    "failed": failed,
    "skipped": result.skipped,
  })
}

fn print_result(result: &ScheduleResult, dry_run: bool, elapsed: &str) {
  for outcome in &result.completed {
    match (&outcome.command, dry_run) {
      (Some(command), true) => print_item(symbols::SUCCESS, outcome.name.as_str(), Some(command.as_str())),
      _ => print_item(symbols::SUCCESS, outcome.name.as_str(), None),
    }
  }
  for (name, _) in &result.failed {
    print_item(symbols::ERROR, name.as_str(), None);
  }
  for (name, cause) in &result.skipped {
    print_item(symbols::SKIP, name.as_str(), Some(cause.to_string().as_str()));
  }

  println!();
  if result.is_success() {
    let verb = if dry_run { "Dry run complete" } else { "Run complete" };
    print_success(&format!("{} in {}", verb, elapsed));
  } else {
    for (name, err) in &result.failed {
      print_error(&format!("{}: {}", name, err));
    }
    print_warning("Run finished with failures");
  }
  print_stat("Completed", &result.completed.len().to_string());
  print_stat("Failed", &result.failed.len().to_string());
  print_stat("Skipped", &result.skipped.len().to_string());
}
