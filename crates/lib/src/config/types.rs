use serde::{Deserialize, Serialize};

/// The declarative description of one module.
///
/// Every field is optional at this level. Identity fields are only required
/// once the finalize phase needs them, and absent toggles mean "disabled".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfiguration {
  pub module_name: Option<String>,
  pub module_version: Option<String>,

  pub enable_doc_generation: Option<bool>,
  pub use_alternate_doc_strategy: Option<bool>,
  pub enable_style_enforcement: Option<bool>,
  pub use_alternate_style_strategy: Option<bool>,
  pub enable_lint_enforcement: Option<bool>,
  pub disable_default_dependencies: Option<bool>,

  pub publishing: PublishingConfig,
}

/// Publishing metadata. Only read when a publication is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishingConfig {
  pub repo_display_name: Option<String>,
  pub repo_description: Option<String>,
  pub git_repo_name: Option<String>,
  pub extra_dependencies: Vec<ExtraDependency>,
}

/// An additional dependency declared in the published metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDependency {
  pub group_id: String,
  pub artifact_id: String,
  pub version: String,
}

impl ExtraDependency {
  pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
    Self {
      group_id: group_id.to_string(),
      artifact_id: artifact_id.to_string(),
      version: version.to_string(),
    }
  }
}

impl std::fmt::Display for ExtraDependency {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
  }
}

impl ModuleConfiguration {
  pub fn new(module_name: &str, module_version: &str) -> Self {
    Self {
      module_name: Some(module_name.to_string()),
      module_version: Some(module_version.to_string()),
      ..Self::default()
    }
  }

  /// Fill every unset field from `other`, keeping values already present.
  ///
  /// Used to layer property-derived conventions underneath an explicit
  /// module description.
  pub fn or_convention(mut self, other: ModuleConfiguration) -> Self {
    fn fill<T>(slot: &mut Option<T>, fallback: Option<T>) {
      if slot.is_none() {
        *slot = fallback;
      }
    }

    fill(&mut self.module_name, other.module_name);
    fill(&mut self.module_version, other.module_version);
    fill(&mut self.enable_doc_generation, other.enable_doc_generation);
    fill(&mut self.use_alternate_doc_strategy, other.use_alternate_doc_strategy);
    fill(&mut self.enable_style_enforcement, other.enable_style_enforcement);
    fill(&mut self.use_alternate_style_strategy, other.use_alternate_style_strategy);
    fill(&mut self.enable_lint_enforcement, other.enable_lint_enforcement);
    fill(&mut self.disable_default_dependencies, other.disable_default_dependencies);
    fill(&mut self.publishing.repo_display_name, other.publishing.repo_display_name);
    fill(&mut self.publishing.repo_description, other.publishing.repo_description);
    fill(&mut self.publishing.git_repo_name, other.publishing.git_repo_name);
    if self.publishing.extra_dependencies.is_empty() {
      self.publishing.extra_dependencies = other.publishing.extra_dependencies;
    }

    self
  }
}
