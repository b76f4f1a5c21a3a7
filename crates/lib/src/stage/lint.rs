//! Static analysis (checkstyle).

use glob_match::glob_match;
use serde::Serialize;
use tracing::info;

use crate::action::{ActionDef, ActionKind, names};
use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::checkstyle;
use crate::model::BuildModel;

use super::packaging::toolchain_task;
use super::{ConfigureError, StageConfigurator};

pub const INCLUDES: &[&str] = &["src/**/*.java"];

pub const EXCLUDES: &[&str] = &[
  "**/gen/**",
  "**/test/**",
  "**/legacy/**",
  "**/androidTest/**",
  "**/R.java",
  "**/BuildConfig.java",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintSettings {
  pub tool_version: String,
  pub rules: String,
  pub ignore_failures: bool,
  pub show_violations: bool,
  pub includes: Vec<String>,
  pub excludes: Vec<String>,
}

impl Default for LintSettings {
  fn default() -> Self {
    Self {
      tool_version: checkstyle::TOOL_VERSION.to_string(),
      rules: checkstyle::CONFIG.to_string(),
      ignore_failures: false,
      show_violations: true,
      includes: INCLUDES.iter().map(|s| s.to_string()).collect(),
      excludes: EXCLUDES.iter().map(|s| s.to_string()).collect(),
    }
  }
}

impl LintSettings {
  /// Whether a module-relative source path is subject to the lint pass.
  pub fn covers(&self, path: &str) -> bool {
    let path = path.trim_start_matches("./");
    self.includes.iter().any(|p| glob_match(p, path)) && !self.excludes.iter().any(|p| glob_match(p, path))
  }
}

pub struct Lint;

impl StageConfigurator for Lint {
  fn capability(&self) -> Capability {
    Capability::Lint
  }

  fn configure(&self, _config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    let settings = LintSettings::default();
    info!(version = %settings.tool_version, "lint configured");
    model.lint = Some(settings);

    model.actions.register(
      ActionDef::new(names::CHECKSTYLE, ActionKind::StaticAnalysis)
        .describe("run checkstyle over module sources")
        .exec(toolchain_task(names::CHECKSTYLE)),
    );
    Ok(())
  }
}
