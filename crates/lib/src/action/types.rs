use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::placeholder::{self, PlaceholderError};

/// Name of a build action, unique within one module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionName(pub String);

impl ActionName {
  pub fn new(name: &str) -> Self {
    Self(name.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for ActionName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<&str> for ActionName {
  fn from(name: &str) -> Self {
    ActionName::new(name)
  }
}

/// What an action does, as far as ordering and scheduling are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
  Assemble,
  UnitTest,
  InstrumentedTest,
  StaticAnalysis,
  CoverageReport,
  DocGenerate,
  DocPackage,
  FormatCheck,
  FormatApply,
  PublishLocal,
  PublishRemote,
  Sign,
  /// Aggregates other actions and has no work of its own.
  Lifecycle,
}

impl ActionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ActionKind::Assemble => "assemble",
      ActionKind::UnitTest => "unit-test",
      ActionKind::InstrumentedTest => "instrumented-test",
      ActionKind::StaticAnalysis => "static-analysis",
      ActionKind::CoverageReport => "coverage-report",
      ActionKind::DocGenerate => "doc-generate",
      ActionKind::DocPackage => "doc-package",
      ActionKind::FormatCheck => "format-check",
      ActionKind::FormatApply => "format-apply",
      ActionKind::PublishLocal => "publish-local",
      ActionKind::PublishRemote => "publish-remote",
      ActionKind::Sign => "sign",
      ActionKind::Lifecycle => "lifecycle",
    }
  }
}

impl std::fmt::Display for ActionKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Runtime condition evaluated against the requested action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
  /// Run only when a remote publish action is part of the same invocation.
  RemotePublishRequested,
}

/// How to invoke the external tool behind an action.
///
/// The binary, arguments and environment values may contain `$${env:NAME}`
/// and `$${out}` placeholders. They are resolved when the
/// action executes, never while configuring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecOpts {
  pub bin: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub args: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub env: Option<BTreeMap<String, String>>,
}

impl ExecOpts {
  pub fn new(bin: &str) -> Self {
    Self {
      bin: bin.to_string(),
      args: Vec::new(),
      env: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
    self.env = Some(env);
    self
  }

  /// The command line as a single display string.
  pub fn command_line(&self) -> String {
    std::iter::once(self.bin.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Every string that may hold placeholders.
  fn templates(&self) -> impl Iterator<Item = &str> {
    std::iter::once(self.bin.as_str())
      .chain(self.args.iter().map(String::as_str))
      .chain(self.env.iter().flat_map(|env| env.values().map(String::as_str)))
  }
}

impl From<&str> for ExecOpts {
  fn from(bin: &str) -> Self {
    ExecOpts::new(bin)
  }
}

/// A registered build action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
  pub name: ActionName,
  pub kind: ActionKind,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,
  /// Actions that must complete first and are pulled in when this one is requested.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub depends_on: Vec<ActionName>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exec: Option<ExecOpts>,
  /// Environment variables that must be set when the action runs.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub required_env: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub only_if: Option<Condition>,
}

impl ActionDef {
  pub fn new(name: &str, kind: ActionKind) -> Self {
    Self {
      name: ActionName::new(name),
      kind,
      description: String::new(),
      depends_on: Vec::new(),
      exec: None,
      required_env: Vec::new(),
      only_if: None,
    }
  }

  pub fn describe(mut self, description: &str) -> Self {
    self.description = description.to_string();
    self
  }

  pub fn depends_on(mut self, name: &str) -> Self {
    let name = ActionName::new(name);
    if !self.depends_on.contains(&name) {
      self.depends_on.push(name);
    }
    self
  }

  pub fn exec(mut self, opts: impl Into<ExecOpts>) -> Self {
    self.exec = Some(opts.into());
    self
  }

  pub fn requires_env(mut self, var: &str) -> Self {
    self.required_env.push(var.to_string());
    self
  }

  pub fn only_if(mut self, condition: Condition) -> Self {
    self.only_if = Some(condition);
    self
  }

  /// Environment variables the action needs at run time: the declared ones,
  /// then any referenced by its invocation that were not declared.
  pub fn env_vars(&self) -> Result<Vec<String>, PlaceholderError> {
    let mut vars = self.required_env.clone();
    if let Some(exec) = &self.exec {
      for template in exec.templates() {
        for var in placeholder::env_references(template)? {
          if !vars.contains(&var) {
            vars.push(var);
          }
        }
      }
    }
    Ok(vars)
  }
}
