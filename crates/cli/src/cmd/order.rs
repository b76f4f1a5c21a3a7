//! Implementation of the `forge order` command.
//!
//! Resolves the requested actions against the finalized module and prints the
//! waves they would run in, without running anything.

use anyhow::{Context, Result};

use crate::ModuleArgs;
use crate::output::{OutputFormat, print_info, print_item, print_json, symbols};

pub fn cmd_order(args: &ModuleArgs, actions: &[String], format: OutputFormat) -> Result<()> {
  let module = args.finalize()?;
  let schedule = module.graph.resolve(actions).context("Failed to resolve actions")?;

  if format.is_json() {
    return print_json(&schedule);
  }

  print_info(&format!(
    "{} action(s) in {} wave(s)",
    schedule.len(),
    schedule.waves.len()
  ));
  for (idx, wave) in schedule.waves.iter().enumerate() {
    println!("Wave {}:", idx + 1);
    for name in wave {
      let kind = module.model.actions.get(name.as_str()).map(|def| def.kind.as_str());
      print_item(symbols::ARROW, name.as_str(), kind);
    }
  }

  if !schedule.skipped.is_empty() {
    println!("Skipped:");
    for skipped in &schedule.skipped {
      print_item(symbols::SKIP, skipped.name.as_str(), Some(skipped.reason.to_string().as_str()));
    }
  }

  Ok(())
}
