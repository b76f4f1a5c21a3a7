//! plan, identity, pom and order integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

#[test]
fn plan_minimal_module() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("com.adobe.marketing.mobile:edge:3.0.0-SNAPSHOT"))
    .stdout(predicate::str::contains("assemblePhone"))
    .stdout(predicate::str::contains("checkstyle").not());
}

#[test]
fn plan_full_module_lists_optional_actions() {
  let env = TestEnv::from_fixture("full.toml");

  env
    .forge_cmd()
    .args(["plan", "-P", "release"])
    .assert()
    .success()
    .stdout(predicate::str::contains("com.adobe.marketing.mobile:edge:3.0.0"))
    .stdout(predicate::str::contains("dokkaJavadoc"))
    .stdout(predicate::str::contains("spotlessCheck"))
    .stdout(predicate::str::contains("checkstyle"))
    .stdout(predicate::str::contains("build/libs/edge-javadoc.jar"));
}

#[test]
fn plan_bare_toggle_flag_enables_capability() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .args(["plan", "-P", "enableLintEnforcement"])
    .assert()
    .success()
    .stdout(predicate::str::contains("checkstyle"));
}

#[test]
fn plan_json_is_parseable() {
  let env = TestEnv::from_fixture("full.toml");

  let output = env.forge_cmd().args(["plan", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["identity"]["artifact_id"], "edge");
  assert_eq!(json["identity"]["is_snapshot"], true);
  assert!(
    json["capabilities"]
      .as_array()
      .unwrap()
      .contains(&serde_json::json!("lint"))
  );
}

#[test]
fn identity_from_properties_only() {
  let env = TestEnv::empty();
  env.write_file("gradle.properties", &fixture_content("conventions.properties"));

  env
    .forge_cmd()
    .args(["identity", "-P", "jitpack", "-P", "release"])
    .assert()
    .success()
    .stdout(predicate::str::contains("com.github.adobe.aepsdk-edge-android:edge:3.0.0"));
}

#[test]
fn identity_flag_overrides_properties_file() {
  let env = TestEnv::empty();
  env.write_file("gradle.properties", &fixture_content("conventions.properties"));

  let output = env
    .forge_cmd()
    .args(["identity", "--format", "json", "-P", "moduleVersion=3.1.0"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["version"], "3.1.0-SNAPSHOT");
  assert_eq!(
    json["repository_url"],
    "https://oss.sonatype.org/content/repositories/snapshots/"
  );
}

#[test]
fn identity_without_module_name_fails() {
  let env = TestEnv::empty();

  env
    .forge_cmd()
    .arg("identity")
    .assert()
    .failure()
    .stderr(predicate::str::contains("module_name"));
}

#[test]
fn jitpack_without_repo_name_fails() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .args(["plan", "-P", "jitpack"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("git_repo_name"));
}

#[test]
fn explicit_missing_module_file_fails() {
  let env = TestEnv::empty();

  env
    .forge_cmd()
    .args(["plan", "--file", "nope.toml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn pom_lists_dependencies() {
  let env = TestEnv::from_fixture("full.toml");

  env
    .forge_cmd()
    .args(["pom", "-P", "release"])
    .assert()
    .success()
    .stdout(predicate::str::contains("<version>3.0.0</version>"))
    .stdout(predicate::str::contains("<name>Adobe Experience Platform Edge Network</name>"))
    .stdout(predicate::str::contains("<artifactId>edgeidentity</artifactId>"))
    .stdout(predicate::str::contains("scm:git:github.com//adobe/aepsdk-edge-android.git"));
}

#[test]
fn order_places_signing_after_assembly() {
  let env = TestEnv::from_fixture("minimal.toml");

  let output = env
    .forge_cmd()
    .args(["order", "publish", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let waves = json["waves"].as_array().unwrap();
  let wave_of = |name: &str| {
    waves
      .iter()
      .position(|w| w.as_array().unwrap().contains(&serde_json::json!(name)))
      .unwrap_or_else(|| panic!("{} not scheduled", name))
  };

  assert!(wave_of("assemblePhone") < wave_of("signReleasePublication"));
  assert!(wave_of("assemblePhone") < wave_of("publishReleasePublicationToSonatypeRepository"));
}

#[test]
fn order_local_publish_reports_no_signing() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .args(["order", "publishToMavenLocal", "signReleasePublication"])
    .assert()
    .success()
    .stdout(predicate::str::contains("publishReleasePublicationToMavenLocal"))
    .stdout(predicate::str::contains("no remote publish requested"));
}

#[test]
fn order_unknown_action_fails() {
  let env = TestEnv::from_fixture("minimal.toml");

  env
    .forge_cmd()
    .args(["order", "deployEverything"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("deployEverything"));
}
