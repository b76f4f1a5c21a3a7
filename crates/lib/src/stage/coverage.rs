//! Coverage reports aggregated from unit and instrumented test runs.

use serde::Serialize;
use tracing::debug;

use crate::action::{ActionDef, ActionKind, names};
use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::{project, reporting, source_sets};
use crate::model::BuildModel;

use super::packaging::toolchain_task;
use super::{ConfigureError, StageConfigurator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportFormats {
  pub xml: bool,
  pub html: bool,
  pub csv: bool,
}

impl Default for ReportFormats {
  fn default() -> Self {
    Self {
      xml: true,
      html: true,
      csv: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
  /// Action that produces the report.
  pub task: String,
  /// Test action whose execution data feeds the report.
  pub source_action: String,
  pub formats: ReportFormats,
  /// Execution data glob, relative to the build directory.
  pub execution_data: String,
  pub source_dirs: Vec<String>,
  pub additional_source_dirs: Vec<String>,
  pub class_dir: String,
  pub class_excludes: Vec<String>,
}

impl CoverageReport {
  fn new(task: &str, source_action: &str, execution_data: &str) -> Self {
    Self {
      task: task.to_string(),
      source_action: source_action.to_string(),
      formats: ReportFormats::default(),
      execution_data: execution_data.to_string(),
      source_dirs: vec![format!("src/{}/java", source_sets::MAIN)],
      additional_source_dirs: vec![format!("src/{}/java", source_sets::PHONE)],
      class_dir: format!("{}/{}", project::BUILD_DIR, reporting::CLASS_DIR),
      class_excludes: vec![
        reporting::ADB_CLASS.to_string(),
        reporting::BUILD_CONFIG_SOURCE.to_string(),
      ],
    }
  }
}

pub struct Coverage;

impl StageConfigurator for Coverage {
  fn capability(&self) -> Capability {
    Capability::Coverage
  }

  fn configure(&self, _config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    let reports = [
      CoverageReport::new(
        names::UNIT_COVERAGE,
        names::UNIT_TEST,
        reporting::UNIT_TEST_EXECUTION_DATA,
      ),
      CoverageReport::new(
        names::FUNCTIONAL_COVERAGE,
        names::INSTRUMENTED_TEST,
        reporting::FUNCTIONAL_TEST_EXECUTION_DATA,
      ),
    ];

    model.coverage.clear();
    for report in reports {
      model.actions.register(
        ActionDef::new(&report.task, ActionKind::CoverageReport)
          .describe("aggregate coverage into xml and html reports")
          .depends_on(&report.source_action)
          .exec(toolchain_task(&report.task)),
      );
      debug!(report = %report.task, "coverage report configured");
      model.coverage.push(report);
    }
    Ok(())
  }
}
