//! Platform packaging and the default dependency set.
//!
//! Packaging is configured immediately when the orchestrator is created. It
//! reads no toggle and does not depend on the module identity.

use serde::Serialize;
use tracing::debug;

use crate::action::{ActionDef, ActionKind, ExecOpts, names};
use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::{build_types, flavors, project, source_sets};
use crate::model::BuildModel;

use super::{ConfigureError, StageConfigurator};

/// Executable of the packaging toolchain, relative to the module directory.
pub const TOOLCHAIN: &str = "./gradlew";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFlavor {
  pub name: String,
  pub dimension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildType {
  pub name: String,
  pub minify: bool,
  pub unit_test_coverage: bool,
  pub instrumented_test_coverage: bool,
  pub proguard_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSet {
  pub name: String,
  pub source_dirs: Vec<String>,
}

/// The single variant that gets published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishingVariant {
  pub variant: String,
  pub with_sources_jar: bool,
  pub with_javadoc_jar: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLevels {
  pub java_source: String,
  pub java_target: String,
  pub kotlin_jvm_target: String,
  pub kotlin_language_version: String,
  pub kotlin_api_version: String,
}

/// Platform target settings for the packaged library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingSettings {
  pub compile_sdk: u32,
  pub min_sdk: u32,
  pub target_sdk: u32,
  pub instrumentation_runner: String,
  pub consumer_proguard_files: Vec<String>,
  pub build_config: bool,
  pub flavor_dimensions: Vec<String>,
  pub product_flavors: Vec<ProductFlavor>,
  pub build_types: Vec<BuildType>,
  pub source_sets: Vec<SourceSet>,
  pub publishing_variant: PublishingVariant,
  pub unit_tests_return_default_values: bool,
  pub languages: LanguageLevels,
}

impl Default for PackagingSettings {
  fn default() -> Self {
    Self {
      compile_sdk: project::COMPILE_SDK_VERSION,
      min_sdk: project::MIN_SDK_VERSION,
      target_sdk: project::TARGET_SDK_VERSION,
      instrumentation_runner: project::TEST_INSTRUMENTATION_RUNNER.to_string(),
      consumer_proguard_files: vec![project::CONSUMER_PROGUARD_FILE.to_string()],
      build_config: true,
      flavor_dimensions: vec![flavors::TARGET_DIMENSION.to_string()],
      product_flavors: vec![ProductFlavor {
        name: flavors::PHONE.to_string(),
        dimension: flavors::TARGET_DIMENSION.to_string(),
      }],
      build_types: vec![
        BuildType {
          name: build_types::DEBUG.to_string(),
          minify: false,
          unit_test_coverage: true,
          instrumented_test_coverage: true,
          proguard_files: Vec::new(),
        },
        BuildType {
          name: build_types::RELEASE.to_string(),
          minify: false,
          unit_test_coverage: false,
          instrumented_test_coverage: false,
          proguard_files: vec![
            project::DEFAULT_PROGUARD_FILE.to_string(),
            project::PROGUARD_RULES_FILE.to_string(),
          ],
        },
      ],
      source_sets: [source_sets::MAIN, source_sets::PHONE]
        .into_iter()
        .map(|name| SourceSet {
          name: name.to_string(),
          source_dirs: vec![format!("src/{}/java", name)],
        })
        .collect(),
      publishing_variant: PublishingVariant {
        variant: build_types::RELEASE.to_string(),
        with_sources_jar: true,
        with_javadoc_jar: true,
      },
      unit_tests_return_default_values: true,
      languages: LanguageLevels {
        java_source: project::JAVA_SOURCE_COMPATIBILITY.to_string(),
        java_target: project::JAVA_TARGET_COMPATIBILITY.to_string(),
        kotlin_jvm_target: project::KOTLIN_JVM_TARGET.to_string(),
        kotlin_language_version: project::KOTLIN_LANGUAGE_VERSION.to_string(),
        kotlin_api_version: project::KOTLIN_API_VERSION.to_string(),
      },
    }
  }
}

/// Path of the packaged artifact produced by [`names::ASSEMBLE`].
pub fn module_artifact_path(module_name: &str) -> String {
  format!(
    "{}/outputs/aar/{}-{}-{}.aar",
    project::BUILD_DIR,
    module_name,
    flavors::PHONE,
    build_types::RELEASE
  )
}

/// A toolchain task invocation.
pub(crate) fn toolchain_task(task: &str) -> ExecOpts {
  ExecOpts::new(TOOLCHAIN).arg(task)
}

pub struct Packaging;

impl StageConfigurator for Packaging {
  fn capability(&self) -> Capability {
    Capability::Packaging
  }

  fn configure(&self, _config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    model.packaging = Some(PackagingSettings::default());

    model.actions.register(
      ActionDef::new(names::ASSEMBLE, ActionKind::Assemble)
        .describe("assemble the phone flavor")
        .exec(toolchain_task(names::ASSEMBLE)),
    );
    model.actions.register(
      ActionDef::new(names::UNIT_TEST, ActionKind::UnitTest)
        .describe("run unit tests for the phone debug variant")
        .exec(toolchain_task(names::UNIT_TEST)),
    );
    model.actions.register(
      ActionDef::new(names::INSTRUMENTED_TEST, ActionKind::InstrumentedTest)
        .describe("run instrumented tests with coverage on a connected device")
        .exec(toolchain_task(names::INSTRUMENTED_TEST)),
    );

    debug!("packaging configured");
    Ok(())
  }
}

/// A dependency declaration under one configuration bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDecl {
  pub configuration: String,
  pub coordinate: String,
}

impl DependencyDecl {
  pub fn new(configuration: &str, coordinate: &str) -> Self {
    Self {
      configuration: configuration.to_string(),
      coordinate: coordinate.to_string(),
    }
  }
}

/// The fixed dependency set every module gets unless it opts out.
pub const DEFAULT_DEPENDENCIES: &[(&str, &str)] = &[
  ("implementation", "androidx.appcompat:appcompat:1.4.2"),
  ("testImplementation", "junit:junit:4.13.2"),
  ("testImplementation", "org.mockito:mockito-core:4.5.1"),
  ("testImplementation", "org.mockito:mockito-inline:4.5.1"),
  ("testImplementation", "org.json:json:20180813"),
  ("androidTestImplementation", "androidx.test.ext:junit:1.1.3"),
  ("androidTestImplementation", "androidx.test.espresso:espresso-core:3.4.0"),
];

pub struct DefaultDependencies;

impl StageConfigurator for DefaultDependencies {
  fn capability(&self) -> Capability {
    Capability::DefaultDependencies
  }

  fn configure(&self, _config: &ModuleConfiguration, model: &mut BuildModel) -> Result<(), ConfigureError> {
    for (configuration, coordinate) in DEFAULT_DEPENDENCIES {
      let decl = DependencyDecl::new(configuration, coordinate);
      if !model.dependencies.contains(&decl) {
        model.dependencies.push(decl);
      }
    }
    Ok(())
  }
}
