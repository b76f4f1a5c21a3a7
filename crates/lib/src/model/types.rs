use serde::Serialize;

use crate::action::{ActionKind, ActionRegistry};
use crate::publish::{Publication, RepositoryTarget, SigningSettings};
use crate::stage::{CoverageReport, DependencyDecl, DocumentationArtifact, FormatSettings, LintSettings, PackagingSettings};

/// Everything configured for one module.
///
/// Each slot is `None` (or empty) until the stage that owns it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildModel {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub packaging: Option<PackagingSettings>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub documentation: Option<DocumentationArtifact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub formatting: Option<FormatSettings>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lint: Option<LintSettings>,
  pub coverage: Vec<CoverageReport>,
  pub dependencies: Vec<DependencyDecl>,
  pub publications: Vec<Publication>,
  pub repositories: Vec<RepositoryTarget>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub signing: Option<SigningSettings>,
  pub actions: ActionRegistry,
}

impl BuildModel {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn publication(&self, name: &str) -> Option<&Publication> {
    self.publications.iter().find(|p| p.name == name)
  }

  pub fn repository(&self, name: &str) -> Option<&RepositoryTarget> {
    self.repositories.iter().find(|r| r.name == name)
  }

  /// Whether any action of `kind` is registered.
  pub fn has_action_kind(&self, kind: ActionKind) -> bool {
    self.actions.iter().any(|def| def.kind == kind)
  }
}
