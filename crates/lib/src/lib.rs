//! modforge-lib: build configuration orchestration for library modules.
//!
//! A module is described once (`ModuleConfiguration`) and then configured in
//! two phases:
//! - `Orchestrator::configure` applies packaging immediately
//! - `Orchestrator::finalize` activates the optional stages, declares
//!   publishing and signing, and builds the `ExecutionOrderGraph`
//!
//! The resulting `BuildModel` describes what the external tools should do; the
//! `execute` module runs a resolved schedule of its actions.

pub mod action;
pub mod capability;
pub mod config;
pub mod consts;
pub mod execute;
pub mod graph;
pub mod model;
pub mod orchestrator;
pub mod placeholder;
pub mod publish;
pub mod stage;
