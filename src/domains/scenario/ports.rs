use super::memory::{StaticAssignment, StaticScenario};
use super::types::{AgentId, TargetId};
use crate::common::RenderResult;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, BTreeSet};

/// Agent communication graph over agent ids `1..=N`.
pub type AgentGraph = DiGraphMap<AgentId, ()>;

/// Port over the scenario model. The rendering engine only reads through it;
/// graph construction, action-set generation and optimal solving live with the
/// implementor.
pub trait Scenario {
    /// A copy of the agent graph. Node count is the agent count.
    fn graph(&self) -> AgentGraph;

    /// Targets each agent may act on.
    fn action_sets(&self) -> BTreeMap<AgentId, BTreeSet<TargetId>>;

    /// Value of every target, keyed by target id `1..=T`.
    fn target_values(&self) -> BTreeMap<TargetId, f64>;

    /// The optimal assignment for this scenario.
    fn optimal_assignment(&self) -> Box<dyn Assignment>;

    /// Identifying number of the scenario within its simulation run.
    fn nbr(&self) -> u64;
}

/// Port over an assignment of agents to targets.
pub trait Assignment {
    /// `(agent, target)` pairs in agent order; `None` when the agent is idle.
    fn pairs(&self) -> Vec<(AgentId, Option<TargetId>)>;

    /// Chosen target per agent, in agent order.
    fn choices(&self) -> Vec<Option<TargetId>> {
        self.pairs().into_iter().map(|(_, t)| t).collect()
    }

    /// Score of the assignment.
    fn value(&self) -> f64;

    /// Score relative to the optimal score.
    fn efficiency(&self) -> f64;
}

/// A scenario together with the candidate assignments stored alongside it.
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub scenario: StaticScenario,
    pub assignments: Vec<StaticAssignment>,
    /// Present only when every assignment carries a title.
    pub titles: Option<Vec<String>>,
}

/// Port for reading scenario documents (filesystem, fixtures, ...).
pub trait ScenarioSource: Send + Sync {
    fn load_scenario(&self, name: &str) -> RenderResult<LoadedScenario>;
}
