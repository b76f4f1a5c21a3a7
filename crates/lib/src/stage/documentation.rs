//! Documentation generation.
//!
//! There is exactly one documentation artifact slot per module. Whichever
//! strategy configures it last owns it, and the generator action registered by
//! the previous strategy is removed.

use serde::Serialize;
use tracing::{debug, info};

use crate::action::{ActionDef, ActionKind, names};
use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::{project, reporting, source_sets};
use crate::model::BuildModel;

use super::packaging::toolchain_task;
use super::{ConfigureError, StageConfigurator};

/// Packages matching this pattern are left out of generated documentation.
pub const INTERNAL_PACKAGE_PATTERN: &str = r".*\.internal.*";

pub const DOC_CLASSIFIER: &str = "javadoc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStrategy {
  /// The platform's standard documentation tool (javadoc).
  Standard,
  /// The alternate generator (dokka).
  Alternate,
}

impl DocStrategy {
  pub fn from_config(config: &ModuleConfiguration) -> Self {
    if config.use_alternate_doc_strategy.unwrap_or(false) {
      DocStrategy::Alternate
    } else {
      DocStrategy::Standard
    }
  }

  /// Name of the action that generates documentation under this strategy.
  pub fn generator_action(&self) -> &'static str {
    match self {
      DocStrategy::Standard => names::JAVADOC,
      DocStrategy::Alternate => names::DOKKA_JAVADOC,
    }
  }

  pub fn output_dir(&self) -> String {
    match self {
      DocStrategy::Standard => format!("{}/docs/javadoc", project::BUILD_DIR),
      DocStrategy::Alternate => format!("{}/dokka/javadoc", project::BUILD_DIR),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavadocOptions {
  pub member_level: String,
  pub source_dirs: Vec<String>,
  pub excludes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DokkaSourceSet {
  pub name: String,
  pub no_android_sdk_link: bool,
  pub suppressed_packages: Vec<String>,
}

/// Generator settings, tagged by strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DocGenerator {
  Standard(JavadocOptions),
  Alternate { source_sets: Vec<DokkaSourceSet> },
}

impl DocGenerator {
  fn for_strategy(strategy: DocStrategy) -> Self {
    let source_set_names = [source_sets::MAIN, source_sets::PHONE];
    match strategy {
      DocStrategy::Standard => DocGenerator::Standard(JavadocOptions {
        member_level: "public".to_string(),
        source_dirs: source_set_names.iter().map(|s| format!("src/{}/java", s)).collect(),
        excludes: vec![
          reporting::BUILD_CONFIG_SOURCE.to_string(),
          reporting::R_SOURCE.to_string(),
        ],
      }),
      DocStrategy::Alternate => DocGenerator::Alternate {
        source_sets: source_set_names
          .iter()
          .map(|name| DokkaSourceSet {
            name: name.to_string(),
            no_android_sdk_link: false,
            suppressed_packages: vec![INTERNAL_PACKAGE_PATTERN.to_string()],
          })
          .collect(),
      },
    }
  }
}

/// The module's documentation artifact slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationArtifact {
  /// Action that packages the generated documentation.
  pub task: String,
  pub classifier: String,
  pub output_dir: String,
  pub generator: DocGenerator,
}

impl DocumentationArtifact {
  pub fn strategy(&self) -> DocStrategy {
    match self.generator {
      DocGenerator::Standard(_) => DocStrategy::Standard,
      DocGenerator::Alternate { .. } => DocStrategy::Alternate,
    }
  }

  /// Path of the packaged documentation archive.
  pub fn archive_path(&self, module_name: &str) -> String {
    format!("{}/libs/{}-{}.jar", project::BUILD_DIR, module_name, self.classifier)
  }
}

/// Configure `strategy` into the documentation slot of `model`.
pub fn configure_strategy(model: &mut BuildModel, strategy: DocStrategy) {
  if let Some(previous) = model.documentation.as_ref()
    && previous.strategy() != strategy
  {
    let stale = previous.strategy().generator_action();
    model.actions.remove(stale);
    debug!(action = stale, "removed previous documentation generator");
  }

  let generator = strategy.generator_action();
  model.actions.register(
    ActionDef::new(generator, ActionKind::DocGenerate)
      .describe("generate API documentation")
      .exec(toolchain_task(generator)),
  );
  model.actions.register(
    ActionDef::new(names::JAVADOC_JAR, ActionKind::DocPackage)
      .describe("package generated documentation")
      .depends_on(generator)
      .exec(toolchain_task(names::JAVADOC_JAR)),
  );

  model.documentation = Some(DocumentationArtifact {
    task: names::JAVADOC_JAR.to_string(),
    classifier: DOC_CLASSIFIER.to_string(),
    output_dir: strategy.output_dir(),
    generator: DocGenerator::for_strategy(strategy),
  });

  info!(strategy = ?strategy, "documentation configured");
}

pub struct Documentation;

impl StageConfigurator for Documentation {
  fn capability(&self) -> Capability {
    Capability::Documentation
  }

  fn configure(&self, config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    configure_strategy(model, DocStrategy::from_config(config));
    Ok(())
  }
}
