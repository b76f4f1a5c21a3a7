//! Running a single registered action.

pub mod cmd;

use std::collections::BTreeMap;

use tracing::info;

use crate::action::ActionDef;
use crate::execute::types::{ActionOutcome, ExecuteConfig, ExecuteError};
use crate::placeholder::{self, PlaceholderError, Resolver};

pub use cmd::execute_cmd;

/// Resolves placeholders from a snapshot of the environment taken when the run starts.
#[derive(Debug, Clone, Default)]
pub struct EnvResolver {
  vars: BTreeMap<String, String>,
  out_dir: String,
}

impl EnvResolver {
  pub fn new(vars: BTreeMap<String, String>, out_dir: &str) -> Self {
    Self {
      vars,
      out_dir: out_dir.to_string(),
    }
  }

  /// Snapshot the process environment with `config.env_overrides` on top.
  pub fn from_process(config: &ExecuteConfig) -> Self {
    let mut vars: BTreeMap<String, String> = std::env::vars().collect();
    vars.extend(config.env_overrides.clone());
    Self::new(vars, &config.out_dir.to_string_lossy())
  }

  /// Whether `name` is set to a non-empty value.
  pub fn is_set(&self, name: &str) -> bool {
    self.vars.get(name).is_some_and(|v| !v.is_empty())
  }
}

impl Resolver for EnvResolver {
  fn resolve_env(&self, name: &str) -> Result<&str, PlaceholderError> {
    self
      .vars
      .get(name)
      .map(String::as_str)
      .ok_or_else(|| PlaceholderError::UnresolvedEnv(name.to_string()))
  }

  fn resolve_out(&self) -> Result<&str, PlaceholderError> {
    Ok(&self.out_dir)
  }
}

/// Execute one action.
///
/// Required environment variables, declared or referenced by a placeholder,
/// are checked first. Then placeholders in the invocation are resolved. Actions without an invocation complete immediately.
pub async fn execute_action(
  def: &ActionDef,
  resolver: &EnvResolver,
  config: &ExecuteConfig,
) -> Result<ActionOutcome, ExecuteError> {
  if let Some(var) = def.env_vars()?.into_iter().find(|var| !resolver.is_set(var)) {
    return Err(ExecuteError::MissingEnv {
      action: def.name.clone(),
      var,
    });
  }

  let Some(exec) = &def.exec else {
    return Ok(ActionOutcome {
      name: def.name.clone(),
      command: None,
      stdout: String::new(),
      dry_run: config.dry_run,
    });
  };

  let bin = placeholder::substitute(&exec.bin, resolver)?;
  let args = exec
    .args
    .iter()
    .map(|arg| placeholder::substitute(arg, resolver))
    .collect::<Result<Vec<_>, _>>()?;

  let env = match &exec.env {
    Some(env) => {
      let mut resolved = BTreeMap::new();
      for (key, value) in env {
        resolved.insert(key.clone(), placeholder::substitute(value, resolver)?);
      }
      Some(resolved)
    }
    None => None,
  };

  let command = cmd::command_line(&bin, &args);

  if config.dry_run {
    info!(action = %def.name, cmd = %command, "dry run, not executing");
    return Ok(ActionOutcome {
      name: def.name.clone(),
      command: Some(command),
      stdout: String::new(),
      dry_run: true,
    });
  }

  let stdout = execute_cmd(&bin, &args, env.as_ref(), &config.module_dir).await?;

  Ok(ActionOutcome {
    name: def.name.clone(),
    command: Some(command),
    stdout,
    dry_run: false,
  })
}
