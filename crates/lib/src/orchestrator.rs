//! Two-phase module configuration.
//!
//! [`Orchestrator::configure`] applies packaging immediately and leaves the
//! module description open for edits. [`Orchestrator::finalize`] runs once,
//! after the description is complete: it activates the optional stages,
//! declares publishing and signing, adds default dependencies and builds the
//! execution order graph.
//!
//! Finalize works on a scratch copy of the build model. Nothing becomes
//! visible unless every step succeeds, and the phase cannot be re-entered.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capability::Capability;
use crate::config::ModuleConfiguration;
use crate::graph::{ExecutionOrderGraph, GraphError};
use crate::model::BuildModel;
use crate::publish::{BuildEnv, PublishIdentity, configure_publishing, configure_signing};
use crate::stage::{ConfigureError, DefaultDependencies, Packaging, StageConfigurator, deferred_stages};

#[derive(Debug, Error)]
pub enum OrchestrateError {
  #[error(transparent)]
  Configure(#[from] ConfigureError),

  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error("module configuration has already been finalized")]
  AlreadyFinalized,

  #[error("module configuration has not been finalized")]
  NotFinalized,
}

/// The committed result of a successful finalize.
#[derive(Debug, Clone)]
pub struct FinalizedModule {
  pub config: ModuleConfiguration,
  pub env: BuildEnv,
  pub identity: PublishIdentity,
  pub capabilities: Vec<Capability>,
  pub model: BuildModel,
  pub graph: ExecutionOrderGraph,
}

#[derive(Debug)]
enum Phase {
  Configuring,
  Finalized(Box<FinalizedModule>),
  Failed,
}

#[derive(Debug)]
pub struct Orchestrator {
  config: ModuleConfiguration,
  env: BuildEnv,
  model: BuildModel,
  phase: Phase,
}

impl Orchestrator {
  /// Start configuring a module. Packaging is applied right away.
  pub fn configure(config: ModuleConfiguration, env: BuildEnv) -> Result<Self, OrchestrateError> {
    let mut model = BuildModel::new();
    Packaging.configure(&config, &mut model)?;

    info!(
      module = config.module_name.as_deref().unwrap_or("<unnamed>"),
      release = env.is_release_build,
      jitpack = env.is_jitpack_build,
      "module configuration started"
    );

    Ok(Self {
      config,
      env,
      model,
      phase: Phase::Configuring,
    })
  }

  pub fn config(&self) -> &ModuleConfiguration {
    &self.config
  }

  /// Edit the module description. Only allowed before finalize.
  pub fn config_mut(&mut self) -> Result<&mut ModuleConfiguration, OrchestrateError> {
    match self.phase {
      Phase::Configuring => Ok(&mut self.config),
      Phase::Finalized(_) | Phase::Failed => Err(OrchestrateError::AlreadyFinalized),
    }
  }

  pub fn env(&self) -> &BuildEnv {
    &self.env
  }

  /// The committed build model. Before finalize this only holds packaging.
  pub fn model(&self) -> &BuildModel {
    match &self.phase {
      Phase::Finalized(module) => &module.model,
      Phase::Configuring | Phase::Failed => &self.model,
    }
  }

  pub fn is_finalized(&self) -> bool {
    matches!(self.phase, Phase::Finalized(_))
  }

  /// Run the finalize phase. Callable exactly once, whether it succeeds or not.
  pub fn finalize(&mut self) -> Result<&FinalizedModule, OrchestrateError> {
    if !matches!(self.phase, Phase::Configuring) {
      return Err(OrchestrateError::AlreadyFinalized);
    }

    match self.run_finalize() {
      Ok(module) => {
        info!(
          module = %module.identity.artifact_id,
          version = %module.identity.version,
          actions = module.model.actions.len(),
          "module finalized"
        );
        self.phase = Phase::Finalized(Box::new(module));
        self.finalized()
      }
      Err(e) => {
        warn!(error = %e, "finalize failed, nothing committed");
        self.phase = Phase::Failed;
        Err(e)
      }
    }
  }

  pub fn finalized(&self) -> Result<&FinalizedModule, OrchestrateError> {
    match &self.phase {
      Phase::Finalized(module) => Ok(module),
      Phase::Configuring | Phase::Failed => Err(OrchestrateError::NotFinalized),
    }
  }

  pub fn into_finalized(self) -> Result<FinalizedModule, OrchestrateError> {
    match self.phase {
      Phase::Finalized(module) => Ok(*module),
      Phase::Configuring | Phase::Failed => Err(OrchestrateError::NotFinalized),
    }
  }

  fn run_finalize(&self) -> Result<FinalizedModule, OrchestrateError> {
    let config = &self.config;
    let mut scratch = self.model.clone();

    for stage in deferred_stages() {
      let capability = stage.capability();
      if capability.is_enabled(config) {
        debug!(capability = %capability, "configuring stage");
        stage.configure(config, &mut scratch)?;
      } else {
        debug!(capability = %capability, "stage disabled");
      }
    }

    let identity = configure_publishing(config, &self.env, &mut scratch)?;
    configure_signing(&mut scratch);

    if Capability::DefaultDependencies.is_enabled(config) {
      DefaultDependencies.configure(config, &mut scratch)?;
    }

    let graph = ExecutionOrderGraph::build(&scratch.actions)?;

    Ok(FinalizedModule {
      config: config.clone(),
      env: self.env,
      identity,
      capabilities: Capability::enabled(config),
      model: scratch,
      graph,
    })
  }
}

/// Configure and finalize a module in one step.
pub fn finalize_module(config: ModuleConfiguration, env: BuildEnv) -> Result<FinalizedModule, OrchestrateError> {
  let mut orchestrator = Orchestrator::configure(config, env)?;
  orchestrator.finalize()?;
  orchestrator.into_finalized()
}
