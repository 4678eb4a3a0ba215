use super::ports::{AgentGraph, Assignment, Scenario};
use super::types::{AgentId, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Assignment whose score and efficiency were computed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticAssignment {
    pub pairs: Vec<(AgentId, Option<TargetId>)>,
    pub value: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

impl StaticAssignment {
    pub fn new(pairs: Vec<(AgentId, Option<TargetId>)>, value: f64, efficiency: f64) -> Self {
        Self { pairs, value, efficiency }
    }

    /// Build from per-agent choices; agent ids are assigned `1..=len`.
    pub fn from_choices(choices: &[Option<TargetId>], value: f64, efficiency: f64) -> Self {
        let pairs = choices
            .iter()
            .enumerate()
            .map(|(i, t)| (i as AgentId + 1, *t))
            .collect();
        Self { pairs, value, efficiency }
    }
}

impl Assignment for StaticAssignment {
    fn pairs(&self) -> Vec<(AgentId, Option<TargetId>)> {
        self.pairs.clone()
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

/// Scenario held entirely in memory, as loaded from a scenario document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticScenario {
    pub nbr: u64,
    pub agent_count: u32,
    pub edges: Vec<(AgentId, AgentId)>,
    pub action_sets: BTreeMap<AgentId, BTreeSet<TargetId>>,
    pub target_values: BTreeMap<TargetId, f64>,
    pub optimal: StaticAssignment,
}

impl StaticScenario {
    pub fn new(
        nbr: u64,
        agent_count: u32,
        edges: Vec<(AgentId, AgentId)>,
        action_sets: BTreeMap<AgentId, BTreeSet<TargetId>>,
        target_values: BTreeMap<TargetId, f64>,
        optimal: StaticAssignment,
    ) -> Self {
        Self { nbr, agent_count, edges, action_sets, target_values, optimal }
    }
}

impl Scenario for StaticScenario {
    fn graph(&self) -> AgentGraph {
        let mut graph = AgentGraph::new();
        for agent in 1..=self.agent_count {
            graph.add_node(agent);
        }
        for &(u, v) in &self.edges {
            graph.add_edge(u, v, ());
        }
        graph
    }

    fn action_sets(&self) -> BTreeMap<AgentId, BTreeSet<TargetId>> {
        self.action_sets.clone()
    }

    fn target_values(&self) -> BTreeMap<TargetId, f64> {
        self.target_values.clone()
    }

    fn optimal_assignment(&self) -> Box<dyn Assignment> {
        Box::new(self.optimal.clone())
    }

    fn nbr(&self) -> u64 {
        self.nbr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_contains_isolated_agents() {
        let scenario = StaticScenario::new(
            1,
            4,
            vec![(1, 2)],
            BTreeMap::new(),
            BTreeMap::from([(1, 1.0)]),
            StaticAssignment::new(vec![], 0.0, 1.0),
        );
        let graph = scenario.graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn choices_follow_pairs() {
        let a = StaticAssignment::from_choices(&[Some(2), None, Some(1)], 7.0, 0.5);
        assert_eq!(a.pairs(), vec![(1, Some(2)), (2, None), (3, Some(1))]);
        assert_eq!(a.choices(), vec![Some(2), None, Some(1)]);
    }
}
