//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const CREDENTIAL_VARS: [&str; 4] = ["SONATYPE_USERNAME", "SONATYPE_PASSWORD", "GPG_KEY_ID", "GPG_PASSPHRASE"];

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated module directory.
///
/// Commands run from inside the directory so the default `module.toml` and
/// `gradle.properties` are picked up, and credentials from the outer
/// environment never leak in.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create with `module.toml` copied from a fixture.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    env.write_file("module.toml", &fixture_content(name));
    env
  }

  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the module directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Install a fake `gradlew` that records each task it is asked to run.
  #[cfg(unix)]
  pub fn install_recording_toolchain(&self) {
    use std::os::unix::fs::PermissionsExt;

    self.write_file("gradlew", "#!/bin/sh\necho \"$1\" >> tasks.log\n");
    let path = self.temp.path().join("gradlew");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Tasks recorded by the fake toolchain, in invocation order.
  pub fn recorded_tasks(&self) -> Vec<String> {
    std::fs::read_to_string(self.temp.path().join("tasks.log"))
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// Get a pre-configured Command for the forge binary.
  pub fn forge_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("forge");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    for var in CREDENTIAL_VARS {
      cmd.env_remove(var);
    }
    cmd
  }

  /// Command with every publishing credential set.
  pub fn forge_cmd_with_credentials(&self) -> Command {
    let mut cmd = self.forge_cmd();
    for var in CREDENTIAL_VARS {
      cmd.env(var, "test-value");
    }
    cmd
  }
}
