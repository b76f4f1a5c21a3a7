//! Module description input.
//!
//! A module is described by an explicit TOML file layered over conventions
//! taken from a [`PropertySet`]. Explicit values always win.

pub mod properties;
mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use properties::PropertySet;
pub use types::*;

use crate::publish::BuildEnv;

/// Errors that can occur while loading the module description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("property '{key}' must be true or false, got '{value}'")]
  InvalidBool { key: String, value: String },
}

/// A loaded module description plus the build environment it was loaded under.
#[derive(Debug, Clone)]
pub struct LoadedModule {
  pub config: ModuleConfiguration,
  pub env: BuildEnv,
}

/// Parse a module description from TOML text.
pub fn parse_module(text: &str, origin: &Path) -> Result<ModuleConfiguration, ConfigError> {
  toml::from_str(text).map_err(|source| ConfigError::Parse {
    path: origin.to_path_buf(),
    source,
  })
}

/// Load a module description.
///
/// `module_file` is optional: a module can be described entirely through
/// properties. `properties` is the already-layered property set.
pub fn load_module(module_file: Option<&Path>, properties: &PropertySet) -> Result<LoadedModule, ConfigError> {
  let explicit = match module_file {
    Some(path) => {
      let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;
      debug!(path = %path.display(), "parsing module description");
      parse_module(&text, path)?
    }
    None => ModuleConfiguration::default(),
  };

  let config = explicit.or_convention(properties.to_convention()?);
  let env = properties.build_env();

  info!(
    module = config.module_name.as_deref().unwrap_or("<unnamed>"),
    release = env.is_release_build,
    jitpack = env.is_jitpack_build,
    "loaded module description"
  );

  Ok(LoadedModule { config, env })
}
