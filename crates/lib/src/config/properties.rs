//! Name/value property sets.
//!
//! Properties come from three layers, later layers overriding earlier ones:
//! a `gradle.properties`-style file, `FORGE_PROP_<key>` environment variables,
//! and `-P key[=value]` flags. A property set only provides conventions for the
//! module description and the two build-environment flags.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::ConfigError;
use super::types::ModuleConfiguration;
use crate::consts::{PROPERTY_ENV_PREFIX, publishing};
use crate::publish::BuildEnv;

pub const MODULE_NAME: &str = "moduleName";
pub const MODULE_VERSION: &str = "moduleVersion";
pub const MAVEN_REPO_NAME: &str = "mavenRepoName";
pub const MAVEN_REPO_DESCRIPTION: &str = "mavenRepoDescription";
pub const GIT_REPO_NAME: &str = "gitRepoName";

pub const ENABLE_DOC_GENERATION: &str = "enableDocGeneration";
pub const USE_ALTERNATE_DOC_STRATEGY: &str = "useAlternateDocStrategy";
pub const ENABLE_STYLE_ENFORCEMENT: &str = "enableStyleEnforcement";
pub const USE_ALTERNATE_STYLE_STRATEGY: &str = "useAlternateStyleStrategy";
pub const ENABLE_LINT_ENFORCEMENT: &str = "enableLintEnforcement";
pub const DISABLE_DEFAULT_DEPENDENCIES: &str = "disableDefaultDependencies";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
  values: BTreeMap<String, String>,
}

impl PropertySet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse properties text.
  ///
  /// Supports `key=value`, `key: value` and bare `key` lines, `#`/`!` comments
  /// and line continuations. A line continues when it ends in an odd number of
  /// backslashes, ignoring trailing whitespace.
  pub fn parse(text: &str) -> Self {
    let mut set = Self::new();
    let mut pending = String::new();

    for raw in text.lines() {
      let line = raw.trim();
      if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
        continue;
      }

      let backslashes = line.len() - line.trim_end_matches('\\').len();
      if backslashes % 2 == 1 {
        pending.push_str(&line[..line.len() - 1]);
        continue;
      }
      pending.push_str(line);

      let entry = std::mem::take(&mut pending);
      set.insert_line(&entry);
    }

    if !pending.is_empty() {
      set.insert_line(&pending);
    }

    set
  }

  /// Read a properties file. A missing file yields `Ok(None)`.
  pub fn read_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
    match std::fs::read_to_string(path) {
      Ok(text) => {
        debug!(path = %path.display(), "loaded properties file");
        Ok(Some(Self::parse(&text)))
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  /// Collect `FORGE_PROP_<key>` variables from an environment snapshot.
  pub fn from_env_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    let mut set = Self::new();
    for (key, value) in vars {
      if let Some(name) = key.as_ref().strip_prefix(PROPERTY_ENV_PREFIX)
        && !name.is_empty()
      {
        set.set(name, value.as_ref());
      }
    }
    set
  }

  /// Parse a `-P` flag argument: `key=value` or a bare `key`.
  pub fn parse_flag(arg: &str) -> (String, String) {
    match arg.split_once('=') {
      Some((key, value)) => (key.trim().to_string(), value.to_string()),
      None => (arg.trim().to_string(), String::new()),
    }
  }

  pub fn set(&mut self, key: &str, value: &str) {
    self.values.insert(key.to_string(), value.to_string());
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Overlay `other` on top of this set.
  pub fn merge(mut self, other: PropertySet) -> Self {
    self.values.extend(other.values);
    self
  }

  /// Read a boolean property. Absent keys are `Ok(None)`; a key present with
  /// no value, such as a bare `-P` flag, is `true`.
  pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = self.get(key) else {
      return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
      "" | "true" => Ok(Some(true)),
      "false" => Ok(Some(false)),
      _ => Err(ConfigError::InvalidBool {
        key: key.to_string(),
        value: raw.to_string(),
      }),
    }
  }

  /// Module description conventions contributed by this property set.
  pub fn to_convention(&self) -> Result<ModuleConfiguration, ConfigError> {
    let text = |key: &str| self.get(key).map(str::to_string).filter(|v| !v.is_empty());

    let mut config = ModuleConfiguration {
      module_name: text(MODULE_NAME),
      module_version: text(MODULE_VERSION),
      enable_doc_generation: self.get_bool(ENABLE_DOC_GENERATION)?,
      use_alternate_doc_strategy: self.get_bool(USE_ALTERNATE_DOC_STRATEGY)?,
      enable_style_enforcement: self.get_bool(ENABLE_STYLE_ENFORCEMENT)?,
      use_alternate_style_strategy: self.get_bool(USE_ALTERNATE_STYLE_STRATEGY)?,
      enable_lint_enforcement: self.get_bool(ENABLE_LINT_ENFORCEMENT)?,
      disable_default_dependencies: self.get_bool(DISABLE_DEFAULT_DEPENDENCIES)?,
      ..Default::default()
    };
    config.publishing.repo_display_name = text(MAVEN_REPO_NAME);
    config.publishing.repo_description = text(MAVEN_REPO_DESCRIPTION);
    config.publishing.git_repo_name = text(GIT_REPO_NAME);

    Ok(config)
  }

  /// Release and JitPack flags are keyed on property presence, not value.
  pub fn build_env(&self) -> BuildEnv {
    BuildEnv {
      is_release_build: self.contains(publishing::RELEASE_PROPERTY),
      is_jitpack_build: self.contains(publishing::JITPACK_PROPERTY),
    }
  }

  fn insert_line(&mut self, line: &str) {
    let separator = line.find(|c: char| c == '=' || c == ':');
    let (key, value) = match separator {
      Some(idx) => (&line[..idx], &line[idx + 1..]),
      None => (line, ""),
    };
    let key = key.trim();
    if !key.is_empty() {
      self.set(key, value.trim());
    }
  }
}
