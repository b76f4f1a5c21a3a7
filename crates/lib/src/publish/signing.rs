use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::action::{ActionDef, ActionKind, Condition, names, sign_action_name};
use crate::consts::publishing;
use crate::model::BuildModel;
use crate::stage::packaging::toolchain_task;

const EXECUTABLE_PROPERTY_ENV: &str = "ORG_GRADLE_PROJECT_signing.gnupg.executable";
const KEY_PROPERTY_ENV: &str = "ORG_GRADLE_PROJECT_signing.gnupg.keyName";
const PASSPHRASE_PROPERTY_ENV: &str = "ORG_GRADLE_PROJECT_signing.gnupg.passphrase";

/// How publications are signed. Key material is referenced by environment
/// variable name and resolved when the signing action runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningSettings {
  pub executable: String,
  pub key_id_env: String,
  pub passphrase_env: String,
  /// Publications covered by a signing action.
  pub publications: Vec<String>,
}

impl Default for SigningSettings {
  fn default() -> Self {
    Self {
      executable: publishing::SIGNING_EXECUTABLE.to_string(),
      key_id_env: publishing::SIGNING_KEY_ENV.to_string(),
      passphrase_env: publishing::SIGNING_PASSPHRASE_ENV.to_string(),
      publications: Vec::new(),
    }
  }
}

/// Register a signing action for every publication in `model`.
///
/// Each action runs only if a remote publish is part of the same invocation.
pub fn configure_signing(model: &mut BuildModel) {
  let mut settings = SigningSettings::default();

  let env = BTreeMap::from([
    (EXECUTABLE_PROPERTY_ENV.to_string(), settings.executable.clone()),
    (KEY_PROPERTY_ENV.to_string(), format!("$${{env:{}}}", settings.key_id_env)),
    (PASSPHRASE_PROPERTY_ENV.to_string(), format!("$${{env:{}}}", settings.passphrase_env)),
  ]);

  let mut defs = Vec::new();
  for publication in &model.publications {
    let name = sign_action_name(&publication.name);
    let mut def = ActionDef::new(&name, ActionKind::Sign)
      .describe("sign publication artifacts")
      .exec(toolchain_task(&name).with_env(env.clone()))
      .requires_env(&settings.key_id_env)
      .requires_env(&settings.passphrase_env)
      .only_if(Condition::RemotePublishRequested);
    // The packaged module is ordered through the graph, not pulled in here.
    for artifact in publication.artifacts.iter().filter(|a| a.built_by != names::ASSEMBLE) {
      def = def.depends_on(&artifact.built_by);
    }
    defs.push(def);
    settings.publications.push(publication.name.clone());
  }

  for def in defs {
    model.actions.register(def);
  }

  info!(publications = settings.publications.len(), "signing configured");
  model.signing = Some(settings);
}
