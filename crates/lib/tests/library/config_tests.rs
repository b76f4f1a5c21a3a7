use std::fs;

use modforge_lib::config::{PropertySet, load_module};
use serial_test::serial;
use tempfile::TempDir;

const MODULE_TOML: &str = r#"
module_name = "edge"
enable_lint_enforcement = true

[publishing]
git_repo_name = "aepsdk-edge-android"
"#;

const GRADLE_PROPERTIES: &str = "\
# module conventions
moduleName=ignored
moduleVersion=3.0.0
mavenRepoName=AdobeExperiencePlatformEdgeNetwork
enableLintEnforcement=false
enableDocGeneration=true
";

#[test]
fn file_wins_over_properties_and_flags_win_over_file_properties() {
  let dir = TempDir::new().unwrap();
  let module = dir.path().join("module.toml");
  let props = dir.path().join("gradle.properties");
  fs::write(&module, MODULE_TOML).unwrap();
  fs::write(&props, GRADLE_PROPERTIES).unwrap();

  let mut flags = PropertySet::new();
  let (key, value) = PropertySet::parse_flag("moduleVersion=3.1.0");
  flags.set(&key, &value);
  let (key, value) = PropertySet::parse_flag("release");
  flags.set(&key, &value);

  let layered = PropertySet::read_optional(&props).unwrap().unwrap().merge(flags);
  let loaded = load_module(Some(module.as_path()), &layered).unwrap();

  assert_eq!(loaded.config.module_name.as_deref(), Some("edge"));
  assert_eq!(loaded.config.module_version.as_deref(), Some("3.1.0"));
  assert_eq!(loaded.config.enable_lint_enforcement, Some(true));
  assert_eq!(loaded.config.enable_doc_generation, Some(true));
  assert_eq!(
    loaded.config.publishing.repo_display_name.as_deref(),
    Some("AdobeExperiencePlatformEdgeNetwork")
  );
  assert!(loaded.env.is_release_build);
  assert!(!loaded.env.is_jitpack_build);
}

#[test]
#[serial]
fn environment_properties_sit_between_file_and_flags() {
  temp_env::with_vars(
    [
      ("FORGE_PROP_moduleVersion", Some("4.0.0")),
      ("FORGE_PROP_jitpack", Some("")),
    ],
    || {
      let file = PropertySet::parse("moduleName=core\nmoduleVersion=3.0.0\n");
      let env = PropertySet::from_env_vars(std::env::vars());
      let flags = PropertySet::parse("moduleName=edge\n");

      let layered = file.merge(env).merge(flags);
      let loaded = load_module(None, &layered).unwrap();

      assert_eq!(loaded.config.module_name.as_deref(), Some("edge"));
      assert_eq!(loaded.config.module_version.as_deref(), Some("4.0.0"));
      assert!(loaded.env.is_jitpack_build);
    },
  );
}

#[test]
fn missing_properties_file_is_not_an_error() {
  let dir = TempDir::new().unwrap();
  let props = PropertySet::read_optional(&dir.path().join("gradle.properties")).unwrap();
  assert!(props.is_none());
}

#[test]
fn invalid_toggle_value_is_rejected() {
  let props = PropertySet::parse("moduleName=edge\nenableDocGeneration=yes\n");
  let err = load_module(None, &props).unwrap_err();
  assert_eq!(err.to_string(), "property 'enableDocGeneration' must be true or false, got 'yes'");
}

#[test]
fn bare_toggle_flag_overrides_file_value() {
  let file = PropertySet::parse("moduleName=edge\nenableStyleEnforcement=false\n");
  let mut flags = PropertySet::new();
  let (key, value) = PropertySet::parse_flag("enableStyleEnforcement");
  flags.set(&key, &value);

  let loaded = load_module(None, &file.merge(flags)).unwrap();
  assert_eq!(loaded.config.enable_style_enforcement, Some(true));
}
