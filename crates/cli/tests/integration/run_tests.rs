//! run command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn dry_run_remote_publish_with_credentials() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd_with_credentials()
    .args(["run", "publish", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run complete"))
    .stdout(predicate::str::contains("./gradlew signReleasePublication"));
}

#[test]
fn dry_run_remote_publish_without_signing_key_fails() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .env("SONATYPE_USERNAME", "user")
    .env("SONATYPE_PASSWORD", "secret")
    .args(["run", "publish", "--dry-run"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("GPG_KEY_ID"));
}

#[test]
fn dry_run_local_publish_needs_no_credentials() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .args(["run", "publishToMavenLocal", "--dry-run", "-j", "1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("signReleasePublication").not());
}

#[test]
fn dry_run_json_reports_condition_skip() {
  let env = TestEnv::from_fixture("minimal.toml");

  let output = env
    .forge_cmd()
    .args(["run", "assemblePhone", "signReleasePublication", "--dry-run", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["success"], true);
  assert_eq!(json["skipped"]["signReleasePublication"]["cause"], "condition");
}

#[cfg(unix)]
#[test]
fn local_publish_invokes_toolchain_in_order() {
  let env = TestEnv::from_fixture("full.toml");
  env.install_recording_toolchain();

  env
    .forge_cmd()
    .args(["run", "publishToMavenLocal", "-j", "1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Run complete"));

  let tasks = env.recorded_tasks();
  let position = |task: &str| {
    tasks
      .iter()
      .position(|t| t == task)
      .unwrap_or_else(|| panic!("{} not run; ran {:?}", task, tasks))
  };

  assert!(position("dokkaJavadoc") < position("javadocJar"));
  assert!(position("assemblePhone") < position("publishReleasePublicationToMavenLocal"));
  assert!(position("javadocJar") < position("publishReleasePublicationToMavenLocal"));
  assert!(!tasks.iter().any(|t| t == "signReleasePublication"));
}

#[cfg(unix)]
#[test]
fn failing_tool_fails_the_run() {
  let env = TestEnv::from_fixture("minimal.toml");
  env.write_file("gradlew", "#!/bin/sh\nexit 3\n");
  {
    use std::os::unix::fs::PermissionsExt;
    let path = env.path().join("gradlew");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  env
    .forge_cmd()
    .args(["run", "publishToMavenLocal"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("exit code"));
}
