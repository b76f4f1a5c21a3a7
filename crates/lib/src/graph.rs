//! Execution order graph for a module's actions.
//!
//! Edges run from the action that must come first to the action that comes
//! after it. `DependsOn` edges are hard: requesting the later action pulls the
//! earlier one in. `MustRunAfter` edges only order two actions when both are
//! already part of the same invocation.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::action::{ActionKind, ActionName, ActionRegistry, Condition, names};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("dependency cycle detected involving '{0}'")]
  CycleDetected(String),

  #[error("action '{action}' depends on unknown action '{dependency}'")]
  UnknownDependency { action: String, dependency: String },

  #[error("unknown action: {0}")]
  UnknownAction(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
  DependsOn,
  MustRunAfter,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OrderEdge {
  pub before: ActionName,
  pub after: ActionName,
  pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
  /// Signing only happens alongside a remote publish.
  NoRemotePublish,
}

impl std::fmt::Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SkipReason::NoRemotePublish => write!(f, "no remote publish requested"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAction {
  pub name: ActionName,
  pub reason: SkipReason,
}

/// The actions to run for one invocation, grouped into waves.
///
/// Every action in a wave only has predecessors in earlier waves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSchedule {
  pub waves: Vec<Vec<ActionName>>,
  pub skipped: Vec<SkippedAction>,
}

impl ExecutionSchedule {
  pub fn len(&self) -> usize {
    self.waves.iter().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.waves.is_empty()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.actions().any(|a| a.as_str() == name)
  }

  /// Scheduled actions in execution order.
  pub fn actions(&self) -> impl Iterator<Item = &ActionName> {
    self.waves.iter().flatten()
  }

  /// Wave index of an action, if scheduled.
  pub fn wave_of(&self, name: &str) -> Option<usize> {
    self.waves.iter().position(|w| w.iter().any(|a| a.as_str() == name))
  }
}

#[derive(Debug, Clone)]
struct ActionNode {
  name: ActionName,
  kind: ActionKind,
  only_if: Option<Condition>,
}

/// Acyclic ordering constraints between the registered actions of a module.
#[derive(Debug, Clone)]
pub struct ExecutionOrderGraph {
  graph: DiGraph<ActionNode, EdgeKind>,
  nodes: HashMap<ActionName, NodeIndex>,
}

impl ExecutionOrderGraph {
  /// Build the graph from declared dependencies plus the fixed ordering rules:
  /// local and remote publishing depend on assembly, and every signing action
  /// runs after assembly. Signing has no edge to the upload itself; whether it
  /// runs at all is decided by [`resolve`](Self::resolve).
  pub fn build(registry: &ActionRegistry) -> Result<Self, GraphError> {
    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();

    for def in registry.iter() {
      let idx = graph.add_node(ActionNode {
        name: def.name.clone(),
        kind: def.kind,
        only_if: def.only_if,
      });
      nodes.insert(def.name.clone(), idx);
    }

    let mut order = Self { graph, nodes };

    for def in registry.iter() {
      for dep in &def.depends_on {
        if !order.nodes.contains_key(dep) {
          return Err(GraphError::UnknownDependency {
            action: def.name.to_string(),
            dependency: dep.to_string(),
          });
        }
        order.add_edge(dep, &def.name, EdgeKind::DependsOn);
      }
    }

    let assemble = ActionName::new(names::ASSEMBLE);
    if order.nodes.contains_key(&assemble) {
      for publish in [names::PUBLISH, names::PUBLISH_LOCAL, names::PUBLISH_RELEASE_LOCAL] {
        let publish = ActionName::new(publish);
        if order.nodes.contains_key(&publish) {
          order.add_edge(&assemble, &publish, EdgeKind::DependsOn);
        }
      }
    }

    if order.nodes.contains_key(&assemble) {
      for sign in registry.of_kind(ActionKind::Sign) {
        order.add_edge(&assemble, &sign, EdgeKind::MustRunAfter);
      }
    }

    order.verify_acyclic()?;

    debug!(
      actions = order.graph.node_count(),
      edges = order.graph.edge_count(),
      "built execution order graph"
    );

    Ok(order)
  }

  /// Add an edge, upgrading an existing ordering-only edge to a hard one.
  fn add_edge(&mut self, before: &ActionName, after: &ActionName, kind: EdgeKind) {
    let (Some(&from), Some(&to)) = (self.nodes.get(before), self.nodes.get(after)) else {
      return;
    };
    match self.graph.find_edge(from, to) {
      Some(edge) => {
        if kind == EdgeKind::DependsOn {
          self.graph[edge] = EdgeKind::DependsOn;
        }
      }
      None => {
        self.graph.add_edge(from, to, kind);
      }
    }
  }

  fn verify_acyclic(&self) -> Result<(), GraphError> {
    toposort(&self.graph, None).map_err(|cycle| GraphError::CycleDetected(self.graph[cycle.node_id()].name.to_string()))?;
    Ok(())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.nodes.contains_key(&ActionName::new(name))
  }

  pub fn action_count(&self) -> usize {
    self.graph.node_count()
  }

  pub fn edge_count(&self) -> usize {
    self.graph.edge_count()
  }

  /// All edges, sorted.
  pub fn edges(&self) -> Vec<OrderEdge> {
    let mut edges: Vec<OrderEdge> = self
      .graph
      .edge_references()
      .map(|e| OrderEdge {
        before: self.graph[e.source()].name.clone(),
        after: self.graph[e.target()].name.clone(),
        kind: *e.weight(),
      })
      .collect();
    edges.sort();
    edges
  }

  /// The edge between two actions, if any.
  pub fn edge(&self, before: &str, after: &str) -> Option<EdgeKind> {
    let from = *self.nodes.get(&ActionName::new(before))?;
    let to = *self.nodes.get(&ActionName::new(after))?;
    self.graph.find_edge(from, to).map(|e| self.graph[e])
  }

  /// Direct predecessors of an action over edges of any kind.
  pub fn predecessors(&self, name: &ActionName) -> Vec<ActionName> {
    let Some(&idx) = self.nodes.get(name) else {
      return Vec::new();
    };
    self
      .graph
      .neighbors_directed(idx, Direction::Incoming)
      .map(|dep| self.graph[dep].name.clone())
      .collect()
  }

  /// Actions in a dependency-respecting order.
  pub fn topological_order(&self) -> Result<Vec<ActionName>, GraphError> {
    let sorted = toposort(&self.graph, None)
      .map_err(|cycle| GraphError::CycleDetected(self.graph[cycle.node_id()].name.to_string()))?;
    Ok(sorted.into_iter().map(|idx| self.graph[idx].name.clone()).collect())
  }

  /// Resolve the actions to run when `requested` is asked for.
  ///
  /// The requested set is closed over hard dependencies. Actions gated on a
  /// remote publish are added when one is present and skipped otherwise. The
  /// result is ordered into waves using every edge between scheduled actions.
  pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> Result<ExecutionSchedule, GraphError> {
    let mut roots = Vec::new();
    for name in requested {
      let name = name.as_ref();
      let idx = self
        .nodes
        .get(&ActionName::new(name))
        .ok_or_else(|| GraphError::UnknownAction(name.to_string()))?;
      roots.push(*idx);
    }

    let mut selected = self.close_over_dependencies(roots);

    let remote_requested = selected
      .iter()
      .any(|&idx| self.graph[idx].kind == ActionKind::PublishRemote);

    let gated: Vec<NodeIndex> = self
      .graph
      .node_indices()
      .filter(|&idx| self.graph[idx].only_if == Some(Condition::RemotePublishRequested))
      .collect();

    let mut skipped = Vec::new();
    if remote_requested {
      let added = self.close_over_dependencies(gated);
      selected.extend(added);
    } else {
      for idx in gated {
        if selected.remove(&idx) {
          skipped.push(SkippedAction {
            name: self.graph[idx].name.clone(),
            reason: SkipReason::NoRemotePublish,
          });
        }
      }
    }
    skipped.sort_by(|a, b| a.name.cmp(&b.name));

    let waves = self.waves(&selected)?;

    Ok(ExecutionSchedule { waves, skipped })
  }

  fn close_over_dependencies(&self, roots: Vec<NodeIndex>) -> HashSet<NodeIndex> {
    let mut selected = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = roots.into_iter().collect();

    while let Some(idx) = queue.pop_front() {
      if !selected.insert(idx) {
        continue;
      }
      for edge in self.graph.edges_directed(idx, Direction::Incoming) {
        if *edge.weight() == EdgeKind::DependsOn {
          queue.push_back(edge.source());
        }
      }
    }

    selected
  }

  /// Kahn levels over the subgraph induced by `selected`.
  fn waves(&self, selected: &HashSet<NodeIndex>) -> Result<Vec<Vec<ActionName>>, GraphError> {
    let mut in_degree: HashMap<NodeIndex, usize> = selected
      .iter()
      .map(|&idx| {
        let degree = self
          .graph
          .neighbors_directed(idx, Direction::Incoming)
          .filter(|dep| selected.contains(dep))
          .count();
        (idx, degree)
      })
      .collect();

    let mut remaining: BTreeSet<(ActionName, NodeIndex)> =
      selected.iter().map(|&idx| (self.graph[idx].name.clone(), idx)).collect();
    let mut waves = Vec::new();

    while !remaining.is_empty() {
      let ready: Vec<(ActionName, NodeIndex)> = remaining
        .iter()
        .filter(|(_, idx)| in_degree[idx] == 0)
        .cloned()
        .collect();

      if ready.is_empty() {
        let name = remaining.iter().next().map(|(name, _)| name.to_string()).unwrap_or_default();
        return Err(GraphError::CycleDetected(name));
      }

      for entry in &ready {
        remaining.remove(entry);
        for next in self.graph.neighbors_directed(entry.1, Direction::Outgoing) {
          if let Some(deg) = in_degree.get_mut(&next) {
            *deg = deg.saturating_sub(1);
          }
        }
      }

      waves.push(ready.into_iter().map(|(name, _)| name).collect());
    }

    Ok(waves)
  }
}
