//! Shared fixtures for library integration tests.

use modforge_lib::config::{ExtraDependency, ModuleConfiguration};
use modforge_lib::orchestrator::{FinalizedModule, finalize_module};
use modforge_lib::publish::BuildEnv;

/// A fully described module with every optional capability off.
pub fn edge_config() -> ModuleConfiguration {
  let mut config = ModuleConfiguration::new("edge", "3.0.0");
  config.publishing.repo_display_name = Some("Adobe Experience Platform Edge Network".to_string());
  config.publishing.repo_description = Some("Edge Network extension for the mobile SDK".to_string());
  config.publishing.git_repo_name = Some("aepsdk-edge-android".to_string());
  config.publishing.extra_dependencies = vec![
    ExtraDependency::new("com.adobe.marketing.mobile", "core", "3.0.0"),
    ExtraDependency::new("com.adobe.marketing.mobile", "edgeidentity", "3.0.0"),
  ];
  config
}

/// Every combination of the six toggles applied to `base`, each one unset,
/// off or on.
pub fn toggle_combinations(base: &ModuleConfiguration) -> Vec<ModuleConfiguration> {
  const STATES: [Option<bool>; 3] = [None, Some(false), Some(true)];

  (0..STATES.len().pow(6))
    .map(|n| {
      let state = |toggle: u32| STATES[n / STATES.len().pow(toggle) % STATES.len()];
      let mut config = base.clone();
      config.enable_doc_generation = state(0);
      config.use_alternate_doc_strategy = state(1);
      config.enable_style_enforcement = state(2);
      config.use_alternate_style_strategy = state(3);
      config.enable_lint_enforcement = state(4);
      config.disable_default_dependencies = state(5);
      config
    })
    .collect()
}

pub fn all_envs() -> [BuildEnv; 4] {
  [
    BuildEnv {
      is_release_build: false,
      is_jitpack_build: false,
    },
    BuildEnv {
      is_release_build: true,
      is_jitpack_build: false,
    },
    BuildEnv {
      is_release_build: false,
      is_jitpack_build: true,
    },
    BuildEnv {
      is_release_build: true,
      is_jitpack_build: true,
    },
  ]
}

pub fn finalized(config: ModuleConfiguration) -> FinalizedModule {
  finalize_module(config, BuildEnv::release()).expect("module should finalize")
}
