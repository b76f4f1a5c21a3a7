//! Capability activation.
//!
//! Decides, per capability, whether it is active for a module. Absent toggles
//! are a valid "disabled" state and never an error.

use serde::Serialize;

use crate::config::ModuleConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
  Packaging,
  Documentation,
  StyleEnforcement,
  Lint,
  Coverage,
  DefaultDependencies,
  Publishing,
  Signing,
}

impl Capability {
  pub const ALL: [Capability; 8] = [
    Capability::Packaging,
    Capability::Documentation,
    Capability::StyleEnforcement,
    Capability::Lint,
    Capability::Coverage,
    Capability::DefaultDependencies,
    Capability::Publishing,
    Capability::Signing,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Capability::Packaging => "packaging",
      Capability::Documentation => "documentation",
      Capability::StyleEnforcement => "style",
      Capability::Lint => "lint",
      Capability::Coverage => "coverage",
      Capability::DefaultDependencies => "default-dependencies",
      Capability::Publishing => "publishing",
      Capability::Signing => "signing",
    }
  }

  /// Whether this capability is active for `config`.
  pub fn is_enabled(&self, config: &ModuleConfiguration) -> bool {
    match self {
      Capability::Documentation => config.enable_doc_generation.unwrap_or(false),
      Capability::StyleEnforcement => config.enable_style_enforcement.unwrap_or(false),
      Capability::Lint => config.enable_lint_enforcement.unwrap_or(false),
      Capability::DefaultDependencies => !config.disable_default_dependencies.unwrap_or(false),
      Capability::Packaging | Capability::Coverage | Capability::Publishing | Capability::Signing => true,
    }
  }

  /// Every capability active for `config`, in declaration order.
  pub fn enabled(config: &ModuleConfiguration) -> Vec<Capability> {
    Self::ALL.into_iter().filter(|c| c.is_enabled(config)).collect()
  }
}

impl std::fmt::Display for Capability {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
