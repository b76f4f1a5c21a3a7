//! Build actions and the per-module action registry.
//!
//! Stage configurators register named actions here. Registering a name that
//! already exists replaces the previous definition, so reconfiguring a stage
//! never duplicates its actions.
//!
//! # Well-known actions
//!
//! | name | kind |
//! |------|------|
//! | `assemblePhone` | assemble |
//! | `testPhoneDebugUnitTest` | unit test |
//! | `createPhoneDebugCoverageReport` | instrumented test |
//! | `checkstyle` | static analysis |
//! | `unitTestCoverageReport` / `functionalTestsCoverageReport` | coverage |
//! | `publishToMavenLocal` / `publish` | publish (local / remote) |
//! | `signReleasePublication` | sign |

mod types;

use std::collections::BTreeMap;

use serde::Serialize;

pub use types::*;

pub mod names {
  pub const ASSEMBLE: &str = "assemblePhone";
  pub const UNIT_TEST: &str = "testPhoneDebugUnitTest";
  pub const INSTRUMENTED_TEST: &str = "createPhoneDebugCoverageReport";

  pub const UNIT_COVERAGE: &str = "unitTestCoverageReport";
  pub const FUNCTIONAL_COVERAGE: &str = "functionalTestsCoverageReport";

  pub const JAVADOC: &str = "javadoc";
  pub const DOKKA_JAVADOC: &str = "dokkaJavadoc";
  pub const JAVADOC_JAR: &str = "javadocJar";

  pub const FORMAT_CHECK: &str = "spotlessCheck";
  pub const FORMAT_APPLY: &str = "spotlessApply";
  pub const CHECKSTYLE: &str = "checkstyle";

  pub const PUBLISH_RELEASE_LOCAL: &str = "publishReleasePublicationToMavenLocal";
  pub const PUBLISH_LOCAL: &str = "publishToMavenLocal";
  pub const PUBLISH_RELEASE_REMOTE: &str = "publishReleasePublicationToSonatypeRepository";
  pub const PUBLISH: &str = "publish";
}

/// Name of the signing action for a publication (`release` → `signReleasePublication`).
pub fn sign_action_name(publication: &str) -> String {
  let mut chars = publication.chars();
  let capitalized: String = match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  };
  format!("sign{}Publication", capitalized)
}

/// All actions registered for one module, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionRegistry {
  actions: BTreeMap<ActionName, ActionDef>,
}

impl ActionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register an action, returning the definition it replaced, if any.
  pub fn register(&mut self, def: ActionDef) -> Option<ActionDef> {
    self.actions.insert(def.name.clone(), def)
  }

  pub fn remove(&mut self, name: &str) -> Option<ActionDef> {
    self.actions.remove(&ActionName::new(name))
  }

  pub fn get(&self, name: &str) -> Option<&ActionDef> {
    self.actions.get(&ActionName::new(name))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.actions.contains_key(&ActionName::new(name))
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
    self.actions.values()
  }

  /// Names of all actions of the given kind, in name order.
  pub fn of_kind(&self, kind: ActionKind) -> Vec<ActionName> {
    self
      .actions
      .values()
      .filter(|def| def.kind == kind)
      .map(|def| def.name.clone())
      .collect()
  }
}
