use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::action::{ActionDef, ActionKind, names};
use crate::config::{ExtraDependency, ModuleConfiguration};
use crate::consts::publishing;
use crate::model::BuildModel;
use crate::stage::ConfigureError;
use crate::stage::packaging::{module_artifact_path, toolchain_task};

use super::identity::{BuildEnv, PublishIdentity, derive_publish_identity};

/// Environment passed to the toolchain so it can authenticate against the repository.
const USERNAME_PROPERTY_ENV: &str = "ORG_GRADLE_PROJECT_sonatypeUsername";
const PASSWORD_PROPERTY_ENV: &str = "ORG_GRADLE_PROJECT_sonatypePassword";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedArtifact {
  pub path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub classifier: Option<String>,
  /// Action that produces the file.
  pub built_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
  pub name: String,
  pub url: String,
  pub distribution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Developer {
  pub id: String,
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scm {
  pub connection: String,
  pub developer_connection: String,
  pub url: String,
}

impl Scm {
  pub fn for_repo(repo: &str) -> Self {
    let connection = publishing::SCM_CONNECTION_URL_TEMPLATE.replace("{repo}", repo);
    Self {
      developer_connection: connection.clone(),
      connection,
      url: publishing::SCM_REPO_URL_TEMPLATE.replace("{repo}", repo),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomMetadata {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub url: String,
  pub licenses: Vec<License>,
  pub developers: Vec<Developer>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scm: Option<Scm>,
  pub dependencies: Vec<ExtraDependency>,
}

/// A named, versioned bundle of artifacts plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
  pub name: String,
  pub group_id: String,
  pub artifact_id: String,
  pub version: String,
  pub artifacts: Vec<PublishedArtifact>,
  pub pom: PomMetadata,
}

impl Publication {
  /// Render the publication's POM as XML.
  pub fn pom_xml(&self) -> String {
    let mut out = XmlWriter::default();
    out.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.open(
      r#"project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd""#,
    );
    out.leaf("modelVersion", "4.0.0");
    out.leaf("groupId", &self.group_id);
    out.leaf("artifactId", &self.artifact_id);
    out.leaf("version", &self.version);
    out.leaf("packaging", "aar");
    out.leaf("name", &self.pom.name);
    if let Some(description) = &self.pom.description {
      out.leaf("description", description);
    }
    out.leaf("url", &self.pom.url);

    out.open("licenses");
    for license in &self.pom.licenses {
      out.open("license");
      out.leaf("name", &license.name);
      out.leaf("url", &license.url);
      out.leaf("distribution", &license.distribution);
      out.close("license");
    }
    out.close("licenses");

    out.open("developers");
    for developer in &self.pom.developers {
      out.open("developer");
      out.leaf("id", &developer.id);
      out.leaf("name", &developer.name);
      out.leaf("email", &developer.email);
      out.close("developer");
    }
    out.close("developers");

    if let Some(scm) = &self.pom.scm {
      out.open("scm");
      out.leaf("connection", &scm.connection);
      out.leaf("developerConnection", &scm.developer_connection);
      out.leaf("url", &scm.url);
      out.close("scm");
    }

    if !self.pom.dependencies.is_empty() {
      out.open("dependencies");
      for dep in &self.pom.dependencies {
        out.open("dependency");
        out.leaf("groupId", &dep.group_id);
        out.leaf("artifactId", &dep.artifact_id);
        out.leaf("version", &dep.version);
        out.close("dependency");
      }
      out.close("dependencies");
    }

    out.close("project");
    out.finish()
  }
}

#[derive(Default)]
struct XmlWriter {
  buf: String,
  depth: usize,
}

impl XmlWriter {
  fn line(&mut self, text: &str) {
    for _ in 0..self.depth {
      self.buf.push_str("  ");
    }
    self.buf.push_str(text);
    self.buf.push('\n');
  }

  fn open(&mut self, tag: &str) {
    self.line(&format!("<{}>", tag));
    self.depth += 1;
  }

  fn close(&mut self, tag: &str) {
    self.depth = self.depth.saturating_sub(1);
    self.line(&format!("</{}>", tag));
  }

  fn leaf(&mut self, tag: &str, value: &str) {
    self.line(&format!("<{tag}>{}</{tag}>", escape_xml(value)));
  }

  fn finish(self) -> String {
    self.buf
  }
}

fn escape_xml(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&apos;"),
      _ => out.push(c),
    }
  }
  out
}

/// A remote upload target. Credentials are environment variable names, read
/// only when an upload runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryTarget {
  pub name: String,
  pub url: String,
  pub username_env: String,
  pub password_env: String,
}

/// Configure the `release` publication, its upload target and publish actions.
pub fn configure_publishing(
  config: &ModuleConfiguration,
  env: &BuildEnv,
  model: &mut BuildModel,
) -> Result<PublishIdentity, ConfigureError> {
  let identity = derive_publish_identity(config, env)?;
  let publishing_config = &config.publishing;

  let mut artifacts = vec![PublishedArtifact {
    path: module_artifact_path(&identity.artifact_id),
    classifier: None,
    built_by: names::ASSEMBLE.to_string(),
  }];
  if let Some(doc) = &model.documentation {
    artifacts.push(PublishedArtifact {
      path: doc.archive_path(&identity.artifact_id),
      classifier: Some(doc.classifier.clone()),
      built_by: doc.task.clone(),
    });
  }

  let pom = PomMetadata {
    name: publishing_config
      .repo_display_name
      .clone()
      .unwrap_or_else(|| identity.artifact_id.clone()),
    description: publishing_config.repo_description.clone(),
    url: publishing::DEVELOPER_DOC_URL.to_string(),
    licenses: vec![License {
      name: publishing::LICENSE_NAME.to_string(),
      url: publishing::LICENSE_URL.to_string(),
      distribution: publishing::LICENSE_DIST.to_string(),
    }],
    developers: vec![Developer {
      id: publishing::DEVELOPER_ID.to_string(),
      name: publishing::DEVELOPER_NAME.to_string(),
      email: publishing::DEVELOPER_EMAIL.to_string(),
    }],
    scm: publishing_config.git_repo_name.as_deref().map(Scm::for_repo),
    dependencies: publishing_config.extra_dependencies.clone(),
  };

  let publication = Publication {
    name: publishing::PUBLICATION_NAME.to_string(),
    group_id: identity.group_id.clone(),
    artifact_id: identity.artifact_id.clone(),
    version: identity.version.clone(),
    artifacts,
    pom,
  };

  let repository = RepositoryTarget {
    name: publishing::REPOSITORY_NAME.to_string(),
    url: identity.repository_url.clone(),
    username_env: publishing::USERNAME_ENV.to_string(),
    password_env: publishing::PASSWORD_ENV.to_string(),
  };

  register_publish_actions(model, &publication, &repository);

  info!(
    coordinate = %identity.coordinate(),
    snapshot = identity.is_snapshot,
    artifacts = publication.artifacts.len(),
    "publication configured"
  );

  model.publications.retain(|p| p.name != publication.name);
  model.publications.push(publication);
  model.repositories.retain(|r| r.name != repository.name);
  model.repositories.push(repository);

  Ok(identity)
}

fn register_publish_actions(model: &mut BuildModel, publication: &Publication, repository: &RepositoryTarget) {
  let with_artifacts = |mut def: ActionDef| {
    for artifact in &publication.artifacts {
      def = def.depends_on(&artifact.built_by);
    }
    def
  };

  model.actions.register(with_artifacts(
    ActionDef::new(names::PUBLISH_RELEASE_LOCAL, ActionKind::PublishLocal)
      .describe("publish the release publication to the local repository")
      .exec(toolchain_task(names::PUBLISH_RELEASE_LOCAL)),
  ));
  model.actions.register(
    ActionDef::new(names::PUBLISH_LOCAL, ActionKind::Lifecycle)
      .describe("publish all publications to the local repository")
      .depends_on(names::PUBLISH_RELEASE_LOCAL),
  );

  let credentials = BTreeMap::from([
    (USERNAME_PROPERTY_ENV.to_string(), format!("$${{env:{}}}", repository.username_env)),
    (PASSWORD_PROPERTY_ENV.to_string(), format!("$${{env:{}}}", repository.password_env)),
  ]);
  model.actions.register(with_artifacts(
    ActionDef::new(names::PUBLISH_RELEASE_REMOTE, ActionKind::PublishRemote)
      .describe("upload the release publication to the remote repository")
      .exec(toolchain_task(names::PUBLISH_RELEASE_REMOTE).with_env(credentials))
      .requires_env(&repository.username_env)
      .requires_env(&repository.password_env),
  ));
  model.actions.register(
    ActionDef::new(names::PUBLISH, ActionKind::Lifecycle)
      .describe("publish all publications to remote repositories")
      .depends_on(names::PUBLISH_RELEASE_REMOTE),
  );
}
