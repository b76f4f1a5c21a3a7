mod identity;
mod order;
mod plan;
mod pom;
mod run;

pub use identity::cmd_identity;
pub use order::cmd_order;
pub use plan::cmd_plan;
pub use pom::cmd_pom;
pub use run::cmd_run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use modforge_lib::config::{LoadedModule, PropertySet, load_module};
use modforge_lib::orchestrator::{FinalizedModule, finalize_module};

use crate::ModuleArgs;

const DEFAULT_MODULE_FILE: &str = "module.toml";

impl ModuleArgs {
  /// The module file to read. An explicit `--file` must exist; the default is optional.
  fn module_file(&self) -> Option<PathBuf> {
    match &self.file {
      Some(path) => Some(path.clone()),
      None => {
        let default = PathBuf::from(DEFAULT_MODULE_FILE);
        default.exists().then_some(default)
      }
    }
  }

  /// Directory the module lives in; actions run from here.
  pub fn module_dir(&self) -> PathBuf {
    self
      .module_file()
      .as_deref()
      .and_then(Path::parent)
      .filter(|p| !p.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from("."))
  }

  /// Properties file, then `FORGE_PROP_*` variables, then `-P` flags.
  fn properties(&self) -> Result<PropertySet> {
    let file = PropertySet::read_optional(&self.properties)
      .with_context(|| format!("Failed to read properties: {}", self.properties.display()))?
      .unwrap_or_default();
    let env = PropertySet::from_env_vars(std::env::vars());

    let mut flags = PropertySet::new();
    for arg in &self.props {
      let (key, value) = PropertySet::parse_flag(arg);
      flags.set(&key, &value);
    }

    debug!(file = file.len(), env = env.len(), flags = flags.len(), "property layers");
    Ok(file.merge(env).merge(flags))
  }

  pub fn load(&self) -> Result<LoadedModule> {
    let properties = self.properties()?;
    let module_file = self.module_file();
    load_module(module_file.as_deref(), &properties).context("Failed to load module description")
  }

  pub fn finalize(&self) -> Result<FinalizedModule> {
    let loaded = self.load()?;
    finalize_module(loaded.config, loaded.env).context("Failed to finalize module")
  }
}
