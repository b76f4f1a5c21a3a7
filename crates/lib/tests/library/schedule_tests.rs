use modforge_lib::action::{names, sign_action_name};
use modforge_lib::graph::{GraphError, SkipReason};

use super::common::{all_envs, edge_config, finalized, toggle_combinations};

fn sign() -> String {
  sign_action_name("release")
}

#[test]
fn remote_publish_schedules_signing_after_its_artifacts() {
  let mut config = edge_config();
  config.enable_doc_generation = Some(true);
  let module = finalized(config);

  let schedule = module.graph.resolve(&[names::PUBLISH]).unwrap();

  assert!(schedule.skipped.is_empty());
  let assemble = schedule.wave_of(names::ASSEMBLE).unwrap();
  let jar = schedule.wave_of(names::JAVADOC_JAR).unwrap();
  let sign_wave = schedule.wave_of(&sign()).unwrap();
  let upload = schedule.wave_of(names::PUBLISH_RELEASE_REMOTE).unwrap();
  let publish = schedule.wave_of(names::PUBLISH).unwrap();

  assert!(assemble < sign_wave);
  assert!(jar < sign_wave);
  assert!(upload < publish);
}

#[test]
fn signing_is_not_forced_before_upload() {
  let module = finalized(edge_config());

  assert_eq!(module.graph.edge(&sign(), names::PUBLISH_RELEASE_REMOTE), None);
  assert_eq!(module.graph.edge(names::PUBLISH_RELEASE_REMOTE, &sign()), None);

  let schedule = module.graph.resolve(&[names::PUBLISH_RELEASE_REMOTE]).unwrap();
  assert_eq!(schedule.wave_of(names::ASSEMBLE), Some(0));
  assert_eq!(schedule.wave_of(&sign()), Some(1));
  assert_eq!(schedule.wave_of(names::PUBLISH_RELEASE_REMOTE), Some(1));
}

#[test]
fn local_publish_skips_signing() {
  let module = finalized(edge_config());

  let schedule = module.graph.resolve(&[names::PUBLISH_LOCAL]).unwrap();

  assert!(!schedule.contains(&sign()));
  assert!(!schedule.contains(names::PUBLISH_RELEASE_REMOTE));
  assert!(schedule.contains(names::PUBLISH_RELEASE_LOCAL));
  assert!(schedule.wave_of(names::ASSEMBLE) < schedule.wave_of(names::PUBLISH_RELEASE_LOCAL));
}

#[test]
fn explicitly_requested_signing_is_skipped_without_remote_publish() {
  let module = finalized(edge_config());

  let schedule = module.graph.resolve(&[names::ASSEMBLE.to_string(), sign()]).unwrap();

  assert!(!schedule.contains(&sign()));
  assert_eq!(schedule.skipped.len(), 1);
  assert_eq!(schedule.skipped[0].name.as_str(), sign());
  assert_eq!(schedule.skipped[0].reason, SkipReason::NoRemotePublish);
}

#[test]
fn signing_scheduled_iff_remote_publish_requested() {
  let requests: [&[&str]; 5] = [
    &[names::ASSEMBLE],
    &[names::PUBLISH_LOCAL],
    &[names::PUBLISH_RELEASE_LOCAL, names::UNIT_COVERAGE],
    &[names::PUBLISH],
    &[names::PUBLISH_RELEASE_REMOTE, names::PUBLISH_LOCAL],
  ];

  for config in toggle_combinations(&edge_config()) {
    let module = finalized(config);
    for requested in requests {
      let schedule = module.graph.resolve(requested).unwrap();
      let remote = schedule.contains(names::PUBLISH_RELEASE_REMOTE);
      assert_eq!(schedule.contains(&sign()), remote, "requested {:?}", requested);
    }
  }
}

#[test]
fn schedules_respect_every_scheduled_edge() {
  for env in all_envs() {
    let module = modforge_lib::orchestrator::finalize_module(edge_config(), env).unwrap();
    let schedule = module.graph.resolve(&[names::PUBLISH, names::PUBLISH_LOCAL]).unwrap();

    for edge in module.graph.edges() {
      if let (Some(before), Some(after)) = (
        schedule.wave_of(edge.before.as_str()),
        schedule.wave_of(edge.after.as_str()),
      ) {
        assert!(before < after, "{} -> {} out of order", edge.before, edge.after);
      }
    }
  }
}

#[test]
fn unknown_action_is_rejected() {
  let module = finalized(edge_config());
  let err = module.graph.resolve(&["deployEverything"]).unwrap_err();
  assert!(matches!(err, GraphError::UnknownAction(ref name) if name == "deployEverything"));
}
