//! Implementation of the `forge identity` command.
//!
//! Only loads the module description; no stage is configured.

use anyhow::{Context, Result};

use modforge_lib::publish::derive_publish_identity;

use crate::ModuleArgs;
use crate::output::{OutputFormat, print_json, print_stat, print_success, yes_no};

pub fn cmd_identity(args: &ModuleArgs, format: OutputFormat) -> Result<()> {
  let loaded = args.load()?;
  let identity =
    derive_publish_identity(&loaded.config, &loaded.env).context("Failed to derive publish identity")?;

  if format.is_json() {
    return print_json(&identity);
  }

  print_success(&identity.coordinate());
  print_stat("Group", &identity.group_id);
  print_stat("Artifact", &identity.artifact_id);
  print_stat("Version", &identity.version);
  print_stat("Snapshot", yes_no(identity.is_snapshot));
  print_stat("Repository", &identity.repository_url);

  Ok(())
}
