//! Stage configurators.
//!
//! Each stage configures one external capability by writing settings into the
//! [`BuildModel`] and registering the actions that capability contributes.
//! Stages are independent of one another; the orchestrator decides which of
//! them run and in what order.

pub mod coverage;
pub mod documentation;
pub mod lint;
pub mod packaging;
pub mod style;

use thiserror::Error;

use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::model::BuildModel;

pub use coverage::{Coverage, CoverageReport, ReportFormats};
pub use documentation::{DocGenerator, DocStrategy, Documentation, DocumentationArtifact};
pub use lint::{Lint, LintSettings};
pub use packaging::{DefaultDependencies, DependencyDecl, Packaging, PackagingSettings};
pub use style::{FormatRule, FormatSettings, FormatTarget, Formatter, JavaFormatter, StyleEnforcement};

/// Errors raised while configuring a stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigureError {
  /// A field needed by an enabled stage is absent.
  #[error("missing required configuration '{field}' (needed by {needed_by})")]
  MissingField { field: &'static str, needed_by: Capability },
}

/// One independently configurable stage.
pub trait StageConfigurator {
  /// The capability gating this stage.
  fn capability(&self) -> Capability;

  /// Write this stage's settings and actions into `model`.
  fn configure(&self, config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError>;
}

/// Stages evaluated during finalize, in application order.
pub fn deferred_stages() -> Vec<Box<dyn StageConfigurator>> {
  vec![
    Box::new(Documentation),
    Box::new(StyleEnforcement),
    Box::new(Lint),
    Box::new(Coverage),
  ]
}

/// Read a required text field, reporting which capability needed it.
pub(crate) fn require<'a>(
  value: &'a Option<String>,
  field: &'static str,
  needed_by: Capability,
) -> Result<&'a str, ConfigureError> {
  value
    .as_deref()
    .filter(|v| !v.trim().is_empty())
    .ok_or(ConfigureError::MissingField { field, needed_by })
}
