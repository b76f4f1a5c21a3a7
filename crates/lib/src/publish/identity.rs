use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::consts::publishing;
use crate::stage::{ConfigureError, require};

/// Build-wide parameters that influence publishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnv {
  pub is_release_build: bool,
  pub is_jitpack_build: bool,
}

impl BuildEnv {
  pub fn release() -> Self {
    Self {
      is_release_build: true,
      is_jitpack_build: false,
    }
  }

  pub fn snapshot() -> Self {
    Self::default()
  }
}

/// Coordinates and target repository of a published module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishIdentity {
  pub group_id: String,
  pub artifact_id: String,
  pub version: String,
  pub repository_url: String,
  pub is_snapshot: bool,
}

impl PublishIdentity {
  /// `group:artifact:version`
  pub fn coordinate(&self) -> String {
    format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
  }
}

/// Derive the publish identity of a module.
///
/// Pure: the same configuration and environment always produce the same
/// identity, and nothing is cached between calls.
pub fn derive_publish_identity(config: &ModuleConfiguration, env: &BuildEnv) -> Result<PublishIdentity, ConfigureError> {
  let artifact_id = require(&config.module_name, "module_name", Capability::Publishing)?;
  let module_version = require(&config.module_version, "module_version", Capability::Publishing)?;

  let is_snapshot = !env.is_release_build;

  let version = if is_snapshot {
    format!("{}-{}", module_version, publishing::SNAPSHOT_SUFFIX)
  } else {
    module_version.to_string()
  };

  let group_id = if env.is_jitpack_build {
    let repo = require(&config.publishing.git_repo_name, "git_repo_name", Capability::Publishing)?;
    format!("{}.{}", publishing::JITPACK_GROUP_PREFIX, repo)
  } else {
    publishing::GROUP_ID.to_string()
  };

  let repository_url = if is_snapshot {
    publishing::SNAPSHOTS_URL
  } else {
    publishing::RELEASES_URL
  };

  Ok(PublishIdentity {
    group_id,
    artifact_id: artifact_id.to_string(),
    version,
    repository_url: repository_url.to_string(),
    is_snapshot,
  })
}
