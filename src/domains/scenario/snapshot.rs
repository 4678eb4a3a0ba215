use super::ports::{AgentGraph, Assignment, Scenario};
use super::types::{AgentId, TargetId};
use crate::common::{RenderError, RenderResult};
use std::collections::{BTreeMap, BTreeSet};

/// Validated, read-once view of a scenario for a single rendering pass.
#[derive(Debug, Clone)]
pub struct ScenarioSnapshot {
    pub graph: AgentGraph,
    pub action_sets: BTreeMap<AgentId, BTreeSet<TargetId>>,
    pub target_values: BTreeMap<TargetId, f64>,
    pub agent_count: usize,
    pub target_count: usize,
}

impl ScenarioSnapshot {
    /// Read every accessor once and check ids are contiguous from 1.
    pub fn capture(scenario: &dyn Scenario) -> RenderResult<Self> {
        let graph = scenario.graph();
        let action_sets = scenario.action_sets();
        let target_values = scenario.target_values();
        let agent_count = graph.node_count();
        let target_count = target_values.len();

        if agent_count == 0 || target_count == 0 {
            return Err(RenderError::DegenerateGeometry {
                agents: agent_count,
                targets: target_count,
            });
        }

        if let Some(bad) = graph.nodes().find(|a| !in_range(*a, agent_count)) {
            return Err(RenderError::MalformedScenario(format!(
                "agent id {} outside 1..={}",
                bad, agent_count
            )));
        }
        if let Some(bad) = target_values.keys().find(|t| !in_range(**t, target_count)) {
            return Err(RenderError::MalformedScenario(format!(
                "target id {} outside 1..={}",
                bad, target_count
            )));
        }
        for (agent, targets) in &action_sets {
            if !in_range(*agent, agent_count) {
                return Err(RenderError::MalformedScenario(format!(
                    "action set for unknown agent {}",
                    agent
                )));
            }
            if let Some(t) = targets.iter().find(|t| !in_range(**t, target_count)) {
                return Err(RenderError::MalformedScenario(format!(
                    "agent {} can act on unknown target {}",
                    agent, t
                )));
            }
        }

        Ok(Self { graph, action_sets, target_values, agent_count, target_count })
    }

    /// `(agent, target)` pairs of an assignment that actually picked a target.
    pub fn assignment_edges(&self, assignment: &dyn Assignment) -> RenderResult<Vec<(AgentId, TargetId)>> {
        let mut edges = Vec::new();
        for (agent, target) in assignment.pairs() {
            let Some(target) = target else { continue };
            if !in_range(agent, self.agent_count) || !in_range(target, self.target_count) {
                return Err(RenderError::MalformedScenario(format!(
                    "assignment pair ({}, {}) outside the scenario",
                    agent, target
                )));
            }
            edges.push((agent, target));
        }
        Ok(edges)
    }

    /// Every `(agent, target)` edge implied by the action sets.
    pub fn action_set_edges(&self) -> Vec<(AgentId, TargetId)> {
        self.action_sets
            .iter()
            .flat_map(|(agent, targets)| targets.iter().map(move |t| (*agent, *t)))
            .collect()
    }
}

fn in_range(id: u32, count: usize) -> bool {
    id >= 1 && (id as usize) <= count
}
