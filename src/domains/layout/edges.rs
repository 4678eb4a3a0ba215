use crate::domains::scenario::{AgentGraph, AgentId};

/// Agent-graph edges split by how they are routed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeClassification {
    /// Edges between neighbours in index order, drawn as straight lines.
    pub straight: Vec<(AgentId, AgentId)>,
    /// Edges skipping over at least one agent, drawn as arcs above the row.
    pub curved: Vec<(AgentId, AgentId)>,
}

impl EdgeClassification {
    pub fn len(&self) -> usize {
        self.straight.len() + self.curved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.straight.is_empty() && self.curved.is_empty()
    }
}

/// How a connector travels between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeRoute {
    Straight,
    /// Quadratic arc; `rad` follows the `arc3` convention (fraction of the
    /// chord length the control point is offset by, perpendicular to it).
    Arc { rad: f64 },
}

pub fn is_adjacent(u: AgentId, v: AgentId) -> bool {
    u.abs_diff(v) == 1
}

/// Partition the agent graph's edges. Self-loops land in `curved`.
pub fn classify_edges(graph: &AgentGraph) -> EdgeClassification {
    let mut out = EdgeClassification::default();
    for (u, v, _) in graph.all_edges() {
        if is_adjacent(u, v) {
            out.straight.push((u, v));
        } else {
            out.curved.push((u, v));
        }
    }
    out
}

/// Arc strength for non-adjacent edges; grows with the agent row width.
pub fn arc_radius(arc_rads_scale: f64, agent_count: usize) -> f64 {
    arc_rads_scale * (agent_count as f64 / 5.0)
}

/// Route used for curved agent edges. Negative so arcs drawn left to right
/// bow above the agent row.
pub fn curved_route(arc_rads_scale: f64, agent_count: usize) -> EdgeRoute {
    EdgeRoute::Arc { rad: -arc_radius(arc_rads_scale, agent_count) }
}
