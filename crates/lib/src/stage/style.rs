//! Source formatting rules.

use serde::Serialize;
use tracing::info;

use crate::action::{ActionDef, ActionKind, names};
use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::formatting;
use crate::model::BuildModel;

use super::packaging::toolchain_task;
use super::{ConfigureError, StageConfigurator};

/// Back-end used to format the primary (Java) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum JavaFormatter {
  Prettier {
    version: String,
    plugin_version: String,
    tab_width: u32,
    use_tabs: bool,
    print_width: u32,
  },
  GoogleJavaFormat {
    version: String,
    aosp: bool,
    reflow_long_strings: bool,
  },
}

impl JavaFormatter {
  pub fn from_config(config: &ModuleConfiguration) -> Self {
    if config.use_alternate_style_strategy.unwrap_or(false) {
      JavaFormatter::GoogleJavaFormat {
        version: formatting::GOOGLE_JAVA_FORMAT_VERSION.to_string(),
        aosp: true,
        reflow_long_strings: true,
      }
    } else {
      JavaFormatter::Prettier {
        version: formatting::PRETTIER_VERSION.to_string(),
        plugin_version: formatting::PRETTIER_JAVA_PLUGIN_VERSION.to_string(),
        tab_width: formatting::PRETTIER_TAB_WIDTH,
        use_tabs: formatting::PRETTIER_USE_TABS,
        print_width: formatting::PRETTIER_PRINT_WIDTH,
      }
    }
  }
}

/// Formatter for one target group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Formatter {
  Java(JavaFormatter),
  Ktlint { version: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatRule {
  RemoveUnusedImports,
  ImportOrder,
  EndWithNewline,
  FormatAnnotations,
  ToggleOffOn,
  LicenseHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatTarget {
  pub name: String,
  pub pattern: String,
  pub formatter: Formatter,
  pub rules: Vec<FormatRule>,
}

impl FormatTarget {
  pub fn has_rule(&self, rule: FormatRule) -> bool {
    self.rules.contains(&rule)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSettings {
  pub targets: Vec<FormatTarget>,
  pub license_header: String,
  pub toggle_off: String,
  pub toggle_on: String,
}

impl FormatSettings {
  pub fn new(java: JavaFormatter) -> Self {
    let common = [
      FormatRule::RemoveUnusedImports,
      FormatRule::ImportOrder,
      FormatRule::EndWithNewline,
      FormatRule::LicenseHeader,
    ];

    let mut java_rules = common.to_vec();
    java_rules.extend([FormatRule::FormatAnnotations, FormatRule::ToggleOffOn]);

    Self {
      targets: vec![
        FormatTarget {
          name: "java".to_string(),
          pattern: formatting::JAVA_TARGETS.to_string(),
          formatter: Formatter::Java(java),
          rules: java_rules,
        },
        FormatTarget {
          name: "kotlin".to_string(),
          pattern: formatting::KOTLIN_TARGETS.to_string(),
          formatter: Formatter::Ktlint {
            version: formatting::KTLINT_VERSION.to_string(),
          },
          rules: common.to_vec(),
        },
      ],
      license_header: formatting::LICENSE_HEADER.to_string(),
      toggle_off: formatting::TOGGLE_OFF.to_string(),
      toggle_on: formatting::TOGGLE_ON.to_string(),
    }
  }

  pub fn target(&self, name: &str) -> Option<&FormatTarget> {
    self.targets.iter().find(|t| t.name == name)
  }
}

pub struct StyleEnforcement;

impl StageConfigurator for StyleEnforcement {
  fn capability(&self) -> Capability {
    Capability::StyleEnforcement
  }

  fn configure(&self, config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    let java = JavaFormatter::from_config(config);
    info!(formatter = ?java, "style enforcement configured");
    model.formatting = Some(FormatSettings::new(java));

    model.actions.register(
      ActionDef::new(names::FORMAT_CHECK, ActionKind::FormatCheck)
        .describe("verify source formatting")
        .exec(toolchain_task(names::FORMAT_CHECK)),
    );
    model.actions.register(
      ActionDef::new(names::FORMAT_APPLY, ActionKind::FormatApply)
        .describe("rewrite sources to the enforced format")
        .exec(toolchain_task(names::FORMAT_APPLY)),
    );
    Ok(())
  }
}
