//! Implementation of the `forge pom` command.

use anyhow::{Result, anyhow};

use modforge_lib::consts::publishing::PUBLICATION_NAME;

use crate::ModuleArgs;

pub fn cmd_pom(args: &ModuleArgs) -> Result<()> {
  let module = args.finalize()?;
  let publication = module
    .model
    .publication(PUBLICATION_NAME)
    .ok_or_else(|| anyhow!("No '{}' publication configured", PUBLICATION_NAME))?;

  print!("{}", publication.pom_xml());
  Ok(())
}
