//! Implementation of the `forge plan` command.
//!
//! Finalizes the module and summarizes what was configured: identity,
//! active capabilities, publications and the registered actions.

use anyhow::Result;

use modforge_lib::orchestrator::FinalizedModule;

use crate::ModuleArgs;
use crate::output::{OutputFormat, print_info, print_item, print_json, print_stat, print_success, symbols, yes_no};

pub fn cmd_plan(args: &ModuleArgs, format: OutputFormat, verbose: bool) -> Result<()> {
  let module = args.finalize()?;

  if format.is_json() {
    let json_output = serde_json::json!({
      "identity": module.identity,
      "env": module.env,
      "capabilities": module.capabilities,
      "model": module.model,
      "edges": module.graph.edges(),
    });
    return print_json(&json_output);
  }

  print_summary(&module, verbose);
  Ok(())
}

fn print_summary(module: &FinalizedModule, verbose: bool) {
  let model = &module.model;

  print_success(&format!("Module: {}", module.identity.coordinate()));
  print_stat("Release build", yes_no(module.env.is_release_build));
  print_stat("JitPack build", yes_no(module.env.is_jitpack_build));
  print_stat("Repository", &module.identity.repository_url);

  let capabilities: Vec<&str> = module.capabilities.iter().map(|c| c.as_str()).collect();
  print_stat("Capabilities", &capabilities.join(", "));

  if let Some(docs) = &model.documentation {
    print_stat("Documentation", &format!("{:?} ({})", docs.strategy(), docs.output_dir));
  }
  if let Some(formatting) = &model.formatting {
    let targets: Vec<&str> = formatting.targets.iter().map(|t| t.name.as_str()).collect();
    print_stat("Formatting", &targets.join(", "));
  }
  if let Some(lint) = &model.lint {
    print_stat("Checkstyle", &lint.tool_version);
  }
  print_stat("Dependencies", &model.dependencies.len().to_string());

  println!();
  for publication in &model.publications {
    print_info(&format!("Publication '{}'", publication.name));
    for artifact in &publication.artifacts {
      let note = artifact.classifier.as_deref().unwrap_or("main");
      print_item(symbols::INFO, &artifact.path, Some(note));
    }
  }

  println!();
  print_info(&format!("Actions: {}", model.actions.len()));
  for def in model.actions.iter() {
    print_item(symbols::INFO, def.name.as_str(), Some(def.kind.as_str()));
    if verbose {
      for dep in &def.depends_on {
        println!("      {} {}", symbols::ARROW, dep);
      }
      if let Some(exec) = &def.exec {
        println!("      $ {}", exec.command_line());
      }
    }
  }
}
