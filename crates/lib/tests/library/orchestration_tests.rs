use modforge_lib::action::{ActionKind, names, sign_action_name};
use modforge_lib::capability::Capability;
use modforge_lib::config::ModuleConfiguration;
use modforge_lib::graph::EdgeKind;
use modforge_lib::orchestrator::{OrchestrateError, Orchestrator, finalize_module};
use modforge_lib::publish::{BuildEnv, derive_publish_identity};
use modforge_lib::stage::{ConfigureError, DocStrategy, Formatter, JavaFormatter};

use super::common::{all_envs, edge_config, finalized, toggle_combinations};

#[test]
fn all_toggles_off_registers_no_optional_actions() {
  let module = finalized(edge_config());
  let actions = &module.model.actions;

  assert!(module.model.documentation.is_none());
  assert!(module.model.formatting.is_none());
  assert!(module.model.lint.is_none());
  assert!(!actions.contains(names::JAVADOC));
  assert!(!actions.contains(names::DOKKA_JAVADOC));
  assert!(!actions.contains(names::FORMAT_CHECK));
  assert!(!actions.contains(names::CHECKSTYLE));

  assert!(actions.contains(names::ASSEMBLE));
  assert!(actions.contains(names::UNIT_COVERAGE));
  assert!(actions.contains(names::PUBLISH));
  assert!(actions.contains(&sign_action_name("release")));
  assert!(!module.model.dependencies.is_empty());
}

#[test]
fn every_toggle_combination_finalizes_acyclic() {
  for base in toggle_combinations(&edge_config()) {
    for env in all_envs() {
      let module = finalize_module(base.clone(), env)
        .unwrap_or_else(|e| panic!("finalize failed for {:?} / {:?}: {}", base, env, e));

      let order = module.graph.topological_order().expect("graph should be acyclic");
      assert_eq!(order.len(), module.model.actions.len());

      let position = |name: &str| order.iter().position(|n| n.as_str() == name);
      let assemble = position(names::ASSEMBLE).expect("assemble is always registered");
      for after in [names::PUBLISH, names::PUBLISH_LOCAL, names::PUBLISH_RELEASE_LOCAL] {
        let idx = position(after).expect("publish actions are always registered");
        assert!(assemble < idx, "{} ran before assemble", after);
      }
    }
  }
}

#[test]
fn toggle_sweep_covers_unset_values() {
  let combinations = toggle_combinations(&edge_config());
  assert_eq!(combinations.len(), 729);
  assert!(combinations.iter().any(|c| c.enable_lint_enforcement.is_none() && c.enable_doc_generation == Some(true)));
  assert!(combinations.iter().any(|c| c.enable_style_enforcement.is_none() && c.disable_default_dependencies == Some(false)));
}

#[test]
fn capabilities_follow_toggles() {
  for config in toggle_combinations(&edge_config()) {
    let module = finalized(config.clone());
    let caps = &module.capabilities;

    assert_eq!(
      caps.contains(&Capability::Documentation),
      config.enable_doc_generation == Some(true)
    );
    assert_eq!(
      caps.contains(&Capability::DefaultDependencies),
      config.disable_default_dependencies != Some(true)
    );
    assert_eq!(
      caps.contains(&Capability::StyleEnforcement),
      config.enable_style_enforcement == Some(true)
    );
    assert_eq!(module.model.lint.is_some(), config.enable_lint_enforcement == Some(true));
    assert_eq!(
      module.model.dependencies.is_empty(),
      config.disable_default_dependencies == Some(true)
    );
    assert!(caps.contains(&Capability::Packaging));
    assert!(caps.contains(&Capability::Publishing));
  }
}

#[test]
fn alternate_doc_strategy_replaces_standard_generator() {
  let mut config = edge_config();
  config.enable_doc_generation = Some(true);
  config.use_alternate_doc_strategy = Some(true);

  let module = finalized(config);
  let docs = module.model.documentation.as_ref().expect("docs configured");

  assert_eq!(docs.strategy(), DocStrategy::Alternate);
  assert!(module.model.actions.contains(names::DOKKA_JAVADOC));
  assert!(!module.model.actions.contains(names::JAVADOC));
  assert_eq!(
    module.graph.edge(names::DOKKA_JAVADOC, names::JAVADOC_JAR),
    Some(EdgeKind::DependsOn)
  );
}

#[test]
fn docs_archive_is_published_and_signed_after() {
  let mut config = edge_config();
  config.enable_doc_generation = Some(true);

  let module = finalized(config);
  let publication = module.model.publication("release").expect("release publication");
  let sign = sign_action_name("release");

  assert_eq!(publication.artifacts.len(), 2);
  assert_eq!(publication.artifacts[1].classifier.as_deref(), Some("javadoc"));
  assert_eq!(module.graph.edge(names::JAVADOC_JAR, &sign), Some(EdgeKind::DependsOn));
  assert_eq!(module.graph.edge(names::ASSEMBLE, &sign), Some(EdgeKind::MustRunAfter));
}

#[test]
fn style_strategy_selects_java_formatter() {
  let mut config = edge_config();
  config.enable_style_enforcement = Some(true);

  let prettier = finalized(config.clone());
  let java = prettier.model.formatting.as_ref().and_then(|f| f.target("java")).unwrap();
  assert!(matches!(java.formatter, Formatter::Java(JavaFormatter::Prettier { .. })));

  config.use_alternate_style_strategy = Some(true);
  let google = finalized(config);
  let java = google.model.formatting.as_ref().and_then(|f| f.target("java")).unwrap();
  assert!(matches!(java.formatter, Formatter::Java(JavaFormatter::GoogleJavaFormat { .. })));
}

#[test]
fn finalize_runs_exactly_once() {
  let mut orchestrator = Orchestrator::configure(edge_config(), BuildEnv::release()).unwrap();
  assert!(!orchestrator.is_finalized());
  assert!(orchestrator.model().actions.contains(names::ASSEMBLE));

  orchestrator.config_mut().unwrap().enable_lint_enforcement = Some(true);
  let actions = orchestrator.finalize().unwrap().model.actions.len();

  assert!(orchestrator.model().actions.contains(names::CHECKSTYLE));
  assert!(matches!(orchestrator.finalize(), Err(OrchestrateError::AlreadyFinalized)));
  assert!(matches!(orchestrator.config_mut(), Err(OrchestrateError::AlreadyFinalized)));
  assert_eq!(orchestrator.model().actions.len(), actions);
}

#[test]
fn failed_finalize_commits_nothing() {
  let mut config = edge_config();
  config.enable_lint_enforcement = Some(true);
  config.publishing.git_repo_name = None;
  let jitpack = BuildEnv {
    is_release_build: true,
    is_jitpack_build: true,
  };

  let mut orchestrator = Orchestrator::configure(config, jitpack).unwrap();
  let err = orchestrator.finalize().unwrap_err();

  assert!(matches!(
    err,
    OrchestrateError::Configure(ConfigureError::MissingField {
      field: "git_repo_name",
      ..
    })
  ));
  assert!(!orchestrator.model().actions.contains(names::CHECKSTYLE));
  assert!(!orchestrator.model().has_action_kind(ActionKind::PublishRemote));
  assert!(matches!(orchestrator.finalize(), Err(OrchestrateError::AlreadyFinalized)));
}

#[test]
fn missing_identity_fails_finalize() {
  let err = finalize_module(ModuleConfiguration::default(), BuildEnv::release()).unwrap_err();
  assert_eq!(
    err.to_string(),
    "missing required configuration 'module_name' (needed by publishing)"
  );
}

#[test]
fn identity_matches_finalized_publication() {
  for env in all_envs() {
    let module = finalize_module(edge_config(), env).unwrap();
    let identity = derive_publish_identity(&edge_config(), &env).unwrap();
    let publication = module.model.publication("release").unwrap();

    assert_eq!(module.identity, identity);
    assert_eq!(publication.group_id, identity.group_id);
    assert_eq!(publication.version, identity.version);
    assert_eq!(module.model.repository("sonatype").unwrap().url, identity.repository_url);
  }
}

#[test]
fn identity_examples() {
  let config = edge_config();

  let release = derive_publish_identity(&config, &BuildEnv::release()).unwrap();
  assert_eq!(release.coordinate(), "com.adobe.marketing.mobile:edge:3.0.0");

  let snapshot = derive_publish_identity(&config, &BuildEnv::snapshot()).unwrap();
  assert_eq!(snapshot.coordinate(), "com.adobe.marketing.mobile:edge:3.0.0-SNAPSHOT");

  let jitpack = BuildEnv {
    is_release_build: true,
    is_jitpack_build: true,
  };
  let jitpack = derive_publish_identity(&config, &jitpack).unwrap();
  assert_eq!(jitpack.coordinate(), "com.github.adobe.aepsdk-edge-android:edge:3.0.0");
}

#[test]
fn pom_lists_extra_dependencies_in_declared_order() {
  let module = finalized(edge_config());
  let pom = module.model.publication("release").unwrap().pom_xml();

  let core = pom.find("<artifactId>core</artifactId>").unwrap();
  let identity = pom.find("<artifactId>edgeidentity</artifactId>").unwrap();
  assert!(core < identity);
  assert!(pom.contains("<url>https://github.com/adobe/aepsdk-edge-android</url>"));
}
